//! Barrowdark - a turn-based terminal roguelike
//!
//! Crawl a barrow full of the restless dead, find the amulet,
//! and get out alive.

pub mod actors;
pub mod ai;
pub mod combat;
pub mod data;
pub mod game;
pub mod items;
pub mod rng;
pub mod save;
pub mod targeting;
pub mod ui;
pub mod world;

// Re-export commonly used types
pub use game::{Command, Game, GameStatus};
pub use world::Map;
