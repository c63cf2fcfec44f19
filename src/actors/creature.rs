//! Creatures: actors that act, fight, and carry things
//!
//! Capabilities are composed, not inherited. A creature without an
//! `Attacker` cannot attack; one without a `Destructible` cannot be harmed.
//! Exactly one AI strategy is active at a time; it is `None` once the
//! creature is dead.

use serde::{Deserialize, Serialize};

use super::actor::{ActorData, ActorId, Position};
use crate::ai::Ai;
use crate::combat::{Attacker, Destructible};
use crate::items::Container;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub id: ActorId,
    pub pos: Position,
    pub data: ActorData,

    // Ability scores feeding the attribute tables
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,

    pub gold: i32,
    /// Wielding a ranged weapon (missile attack rules apply)
    pub is_ranged: bool,

    pub attacker: Option<Attacker>,
    pub destructible: Option<Destructible>,
    pub container: Option<Container>,
    pub ai: Option<Ai>,

    /// Turn on which this creature died; corpses linger one full turn
    /// before the scheduler sweeps them
    pub died_on_turn: Option<u64>,
}

impl Creature {
    pub fn new(id: ActorId, pos: Position, data: ActorData) -> Self {
        Self {
            id,
            pos,
            data,
            strength: 10,
            dexterity: 10,
            constitution: 10,
            gold: 0,
            is_ranged: false,
            attacker: None,
            destructible: None,
            container: None,
            ai: None,
            died_on_turn: None,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.destructible.as_ref().map_or(false, |d| d.is_dead())
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    /// Living creatures block movement; corpses do not
    pub fn blocks(&self) -> bool {
        self.is_alive()
    }

    /// Permanent death transition: corpse glyph and name, AI deactivated.
    /// The creature stays in the world list until the end-of-turn sweep.
    pub fn become_corpse(&mut self, turn: u64) {
        let corpse_name = self
            .destructible
            .as_ref()
            .map(|d| d.corpse_name.clone())
            .unwrap_or_else(|| format!("remains of {}", self.data.name));
        self.data.glyph = '%';
        self.data.name = corpse_name;
        self.data.color = (140, 30, 30);
        self.ai = None;
        self.died_on_turn = Some(turn);
    }
}
