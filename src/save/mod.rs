//! Persistence: JSON snapshots of a running game

pub mod save_game;

pub use save_game::{
    capture, delete_save, load_game, load_game_from, restore, save_exists, save_game,
    save_game_to, SaveData, SaveError,
};
