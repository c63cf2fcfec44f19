//! World module: the dungeon floor grid, visibility, and line of sight

pub mod fov;
pub mod map;
pub mod tile;

pub use fov::compute_fov;
pub use map::Map;
pub use tile::{Tile, TileType};
