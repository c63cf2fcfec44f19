//! Destructible: health, armor class, death state
//!
//! hp is clamped to [0, hp_max] by every operation; nothing else may write
//! it directly.

use serde::{Deserialize, Serialize};

use crate::actors::Creature;
use crate::data::{DataError, GameData};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destructible {
    hp: i32,
    pub hp_max: i32,
    /// AC before dexterity and equipment (descending: lower is better)
    pub base_ac: i32,
    /// Current AC, recomputed on equip/unequip
    ac: i32,
    /// Flat damage reduction subtracted from every hit
    pub dr: i32,
    /// To-hit-armor-class-0 of this creature's attacks
    pub thaco: i32,
    /// Experience: award granted to the killer, accumulated total for
    /// the player
    pub xp: i32,
    pub corpse_name: String,
}

impl Destructible {
    pub fn new(
        hp_max: i32,
        dr: i32,
        corpse_name: impl Into<String>,
        xp: i32,
        thaco: i32,
        armor_class: i32,
    ) -> Self {
        Self {
            hp: hp_max,
            hp_max,
            base_ac: armor_class,
            ac: armor_class,
            dr,
            thaco,
            xp,
            corpse_name: corpse_name.into(),
        }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn armor_class(&self) -> i32 {
        self.ac
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Apply already-mitigated damage; returns the hp actually removed.
    /// Never drives hp below zero.
    pub fn take_damage(&mut self, damage: i32) -> i32 {
        let applied = damage.clamp(0, self.hp);
        self.hp -= applied;
        applied
    }

    /// Restore hp up to hp_max; returns the amount actually restored
    /// (0 means the heal failed)
    pub fn heal(&mut self, amount: i32) -> i32 {
        let restored = amount.clamp(0, self.hp_max - self.hp);
        self.hp += restored;
        restored
    }

    pub(crate) fn set_armor_class(&mut self, ac: i32) {
        self.ac = ac;
    }
}

/// Recompute a creature's armor class: base AC, dexterity defensive
/// adjustment, and every equipped item's bonus. Idempotent; called only on
/// equip/unequip.
pub fn update_armor_class(creature: &mut Creature, data: &GameData) -> Result<(), DataError> {
    let dex_adj = data.dexterity_row(creature.dexterity)?.defense_adj;
    let equipment_adj = creature
        .container
        .as_ref()
        .map_or(0, |c| c.equipment.ac_bonus());
    if let Some(d) = creature.destructible.as_mut() {
        d.set_armor_class(d.base_ac + dex_adj + equipment_adj);
    }
    Ok(())
}
