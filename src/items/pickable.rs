//! Pickables: the use-effect strategy bound to an item
//!
//! A closed sum type instead of a trait object: every variant carries its
//! own parameters, the serialization discriminant is the variant tag, and
//! pickup/use logic switches on type rather than on name strings. The
//! actual effects run in `game::actions`, which has the world in hand.

use serde::{Deserialize, Serialize};

use crate::data::HandRequirement;
use crate::rng::DamageRoll;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pickable {
    /// Restores hp, fails (and is retained) at full health
    Healer { amount: i32 },
    /// Strikes the closest visible creature in range
    LightningBolt { range: i32, damage: i32 },
    /// Burns every creature within `radius` of the chosen tile,
    /// the caster included
    Fireball { range: i32, radius: i32, damage: i32 },
    /// Replaces the target's AI with a confused one for `turns` turns
    Confuser { turns: i32, range: i32 },
    /// Currency; always consumed into the user's gold counter
    Gold { amount: i32 },
    /// The victory condition; never consumed
    Amulet,
    /// Equip toggle for a body slot; negative bonus improves AC
    Armor { ac_bonus: i32 },
    /// Equip toggle for a hand slot
    Weapon {
        damage: DamageRoll,
        hands: HandRequirement,
        hit_bonus: i32,
        damage_bonus: i32,
        ranged: bool,
    },
    /// Restores nutrition
    Food { nutrition: i32 },
}

impl Pickable {
    /// Armor class contribution while equipped (0 for non-equipment)
    pub fn ac_bonus(&self) -> i32 {
        match self {
            Pickable::Armor { ac_bonus } => *ac_bonus,
            _ => 0,
        }
    }

    /// Equip-type pickables toggle a slot instead of being consumed
    pub fn is_equipment(&self) -> bool {
        matches!(self, Pickable::Armor { .. } | Pickable::Weapon { .. })
    }

    /// Does using this pickable require the frontend to pick a tile?
    pub fn needs_target_tile(&self) -> bool {
        matches!(
            self,
            Pickable::Fireball { .. } | Pickable::Confuser { .. }
        )
    }
}
