//! Game save/load system
//!
//! Saves are JSON. Every creature and item is written as its own value so
//! one corrupt record does not take the whole save down with it: malformed
//! monsters and items are skipped with a warning on load, while a damaged
//! player record, a bad version, or an unreadable file is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::actors::{ActorId, Creature, Item};
use crate::data::GameData;
use crate::game::hunger::Hunger;
use crate::game::log::MessageLog;
use crate::game::{Game, GameStatus};
use crate::rng::Dice;
use crate::world::Map;

/// Save file version for compatibility checking
const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("save parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("invalid save data: {0}")]
    InvalidData(String),
}

/// Complete save data structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub status: GameStatus,
    pub turn: u64,
    pub depth: u32,
    pub player_id: ActorId,
    pub next_id: ActorId,
    pub hunger: Hunger,
    pub log: MessageLog,
    pub map: Map,
    /// One record per creature, each decodable on its own
    pub creatures: Vec<Value>,
    pub items: Vec<Value>,
}

/// Get the save directory path
pub fn save_directory() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "barrowdark", "Barrowdark") {
        let mut path = proj_dirs.data_local_dir().to_path_buf();
        path.push("saves");
        path
    } else {
        PathBuf::from("./saves")
    }
}

pub fn save_path() -> PathBuf {
    let mut path = save_directory();
    path.push("save.json");
    path
}

pub fn save_exists() -> bool {
    save_path().exists()
}

/// Snapshot a game. Only an idle game can be captured; mid-turn state
/// has creatures with their strategies taken out.
pub fn capture(game: &Game) -> Result<SaveData, SaveError> {
    if game.status != GameStatus::Idle {
        return Err(SaveError::InvalidData(
            "the game can only be saved between turns".to_string(),
        ));
    }
    let creatures = game
        .creatures
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    let items = game
        .items
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SaveData {
        version: SAVE_VERSION,
        status: game.status,
        turn: game.turn,
        depth: game.depth,
        player_id: game.player_id,
        next_id: game.peek_next_id(),
        hunger: game.hunger.clone(),
        log: game.log.clone(),
        map: game.map.clone(),
        creatures,
        items,
    })
}

/// Rebuild a game from a snapshot. Damaged monster or item records are
/// dropped with a warning; a damaged player record is fatal.
pub fn restore(save: SaveData, data: GameData) -> Result<Game, SaveError> {
    if save.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save.version,
        });
    }

    let mut creatures: Vec<Creature> = Vec::with_capacity(save.creatures.len());
    for record in save.creatures {
        match serde_json::from_value::<Creature>(record) {
            Ok(creature) => creatures.push(creature),
            Err(err) => {
                warn!("dropping unreadable creature record: {err}");
            }
        }
    }
    if !creatures.iter().any(|c| c.id == save.player_id) {
        return Err(SaveError::InvalidData(
            "player record is missing or unreadable".to_string(),
        ));
    }

    let mut items: Vec<Item> = Vec::with_capacity(save.items.len());
    for record in save.items {
        match serde_json::from_value::<Item>(record) {
            Ok(item) => items.push(item),
            Err(err) => {
                warn!("dropping unreadable item record: {err}");
            }
        }
    }

    Ok(Game::from_parts(
        save.map,
        creatures,
        items,
        save.player_id,
        data,
        Dice::from_entropy(),
        save.log,
        save.turn,
        save.status,
        save.hunger,
        save.depth,
        save.next_id,
    ))
}

/// Save the game to the default save file
pub fn save_game(game: &Game) -> Result<(), SaveError> {
    save_game_to(game, &save_path())
}

pub fn save_game_to(game: &Game, path: &Path) -> Result<(), SaveError> {
    let save = capture(game)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(&save)?;
    fs::write(path, json)?;
    info!("game saved to {}", path.display());
    Ok(())
}

/// Load the game from the default save file
pub fn load_game(data: GameData) -> Result<Game, SaveError> {
    load_game_from(&save_path(), data)
}

pub fn load_game_from(path: &Path, data: GameData) -> Result<Game, SaveError> {
    let text = fs::read_to_string(path)?;
    let save: SaveData = serde_json::from_str(&text)?;
    let game = restore(save, data)?;
    info!("game loaded from {}", path.display());
    Ok(game)
}

pub fn delete_save() -> Result<(), SaveError> {
    let path = save_path();
    if path.exists() {
        fs::remove_file(&path)?;
        info!("deleted save file");
    }
    Ok(())
}
