//! Weapon templates
//!
//! Immutable records the item factory stamps instances from. An equipped
//! instance layers a mutable enhancement level on top (see `actors::Item`).

use serde::{Deserialize, Serialize};

use crate::rng::DamageRoll;

/// How many hands a weapon occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandRequirement {
    OneHanded,
    TwoHanded,
    OffHandOnly,
}

/// An immutable weapon record from the static tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponTemplate {
    pub name: String,
    pub damage: DamageRoll,
    pub hands: HandRequirement,
    pub hit_bonus: i32,
    pub damage_bonus: i32,
    pub ranged: bool,
    pub value: i32,
}

pub fn default_weapons() -> Vec<WeaponTemplate> {
    use HandRequirement::*;
    let w = |name: &str, min, max, display: &str, hands, ranged, value| WeaponTemplate {
        name: name.to_string(),
        damage: DamageRoll::new(min, max, display),
        hands,
        hit_bonus: 0,
        damage_bonus: 0,
        ranged,
        value,
    };
    vec![
        w("dagger", 1, 4, "1d4", OneHanded, false, 2),
        w("short sword", 1, 6, "1d6", OneHanded, false, 10),
        w("long sword", 1, 8, "1d8", OneHanded, false, 15),
        w("war hammer", 2, 5, "1d4+1", OneHanded, false, 12),
        w("battle axe", 1, 8, "1d8", OneHanded, false, 14),
        w("greatsword", 1, 10, "1d10", TwoHanded, false, 50),
        w("staff", 1, 6, "1d6", TwoHanded, false, 5),
        w("long bow", 1, 6, "1d6", TwoHanded, true, 75),
    ]
}
