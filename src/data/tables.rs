//! Attribute modifier charts
//!
//! AD&D-style lookup rows keyed by ability score. Negative defense
//! adjustments are good: armor class descends.

use serde::{Deserialize, Serialize};

/// Strength modifiers: to-hit and melee damage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrengthRow {
    pub score: i32,
    /// Added to the attack roll
    pub hit_adj: i32,
    /// Added to rolled damage
    pub dmg_adj: i32,
}

/// Dexterity modifiers: missile accuracy and armor class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DexterityRow {
    pub score: i32,
    /// Added to ranged attack rolls
    pub missile_adj: i32,
    /// Added to armor class (negative improves it)
    pub defense_adj: i32,
}

/// Constitution modifiers: hit points per level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstitutionRow {
    pub score: i32,
    pub hp_adj: i32,
}

pub fn default_strength() -> Vec<StrengthRow> {
    let mut rows = Vec::with_capacity(23);
    for score in 1..=25 {
        let (hit_adj, dmg_adj) = match score {
            1 => (-5, -4),
            2 => (-3, -2),
            3 => (-3, -1),
            4..=5 => (-2, -1),
            6..=7 => (-1, 0),
            8..=15 => (0, 0),
            16 => (0, 1),
            17 => (1, 1),
            18 => (1, 2),
            19 => (3, 7),
            20 => (3, 8),
            21 => (4, 9),
            22 => (4, 10),
            _ => (5, 11),
        };
        rows.push(StrengthRow {
            score,
            hit_adj,
            dmg_adj,
        });
    }
    rows
}

pub fn default_dexterity() -> Vec<DexterityRow> {
    let mut rows = Vec::with_capacity(25);
    for score in 1..=25 {
        let (missile_adj, defense_adj) = match score {
            1 => (-6, 5),
            2 => (-4, 5),
            3 => (-3, 4),
            4 => (-2, 3),
            5 => (-1, 2),
            6 => (0, 1),
            7..=14 => (0, 0),
            15 => (0, -1),
            16 => (1, -2),
            17 => (2, -3),
            18 => (2, -4),
            19..=20 => (3, -4),
            21..=23 => (4, -5),
            _ => (5, -6),
        };
        rows.push(DexterityRow {
            score,
            missile_adj,
            defense_adj,
        });
    }
    rows
}

pub fn default_constitution() -> Vec<ConstitutionRow> {
    let mut rows = Vec::with_capacity(25);
    for score in 1..=25 {
        let hp_adj = match score {
            1 => -3,
            2..=3 => -2,
            4..=6 => -1,
            7..=14 => 0,
            15 => 1,
            16 => 2,
            17..=18 => 3,
            19..=20 => 5,
            _ => 6,
        };
        rows.push(ConstitutionRow { score, hp_adj });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_strength_hits_harder() {
        let rows = default_strength();
        let weak = rows.iter().find(|r| r.score == 3).unwrap();
        let strong = rows.iter().find(|r| r.score == 18).unwrap();
        assert!(strong.dmg_adj > weak.dmg_adj);
        assert!(strong.hit_adj > weak.hit_adj);
    }

    #[test]
    fn high_dexterity_improves_armor_class() {
        let rows = default_dexterity();
        let nimble = rows.iter().find(|r| r.score == 18).unwrap();
        // Descending AC: the adjustment must be negative
        assert!(nimble.defense_adj < 0);
    }
}
