//! AI strategies
//!
//! Exactly one strategy drives a creature at a time. The scheduler takes
//! the strategy out of the creature, runs it, and puts back whatever it
//! returns; confusion uses that to restore the wrapped strategy when it
//! wears off.

pub mod confused;
pub mod monster;
pub mod player;
pub mod shopkeeper;

use serde::{Deserialize, Serialize};

use crate::actors::ActorId;
use crate::data::DataError;
use crate::game::Game;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Ai {
    /// Driven by commands, not by `update`
    Player,
    Monster {
        track_turns: i32,
    },
    Confused {
        turns: i32,
        prev: Box<Ai>,
    },
    Shopkeeper {
        cooldown: i32,
    },
}

impl Ai {
    /// One turn of behavior for `owner`
    pub fn update(self, game: &mut Game, owner: ActorId) -> Result<Ai, DataError> {
        match self {
            Ai::Player => Ok(Ai::Player),
            Ai::Monster { track_turns } => monster::update(game, owner, track_turns),
            Ai::Confused { turns, prev } => confused::update(game, owner, turns, prev),
            Ai::Shopkeeper { cooldown } => Ok(shopkeeper::update(game, owner, cooldown)),
        }
    }
}
