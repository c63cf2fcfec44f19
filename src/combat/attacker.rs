//! Attack resolution
//!
//! THAC0 rules: the attacker needs `thaco - target AC` on a d20, modified
//! by the strength chart, weapon bonuses, and (for missiles) the dexterity
//! chart. Damage is the weapon roll plus the strength damage adjustment,
//! minus the target's damage reduction, floored at zero.

use serde::{Deserialize, Serialize};

use crate::actors::Creature;
use crate::data::{DataError, GameData};
use crate::rng::{DamageRoll, Dice};

/// The attack capability: base damage used when no weapon is wielded
/// (monster natural attacks, unarmed strikes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attacker {
    pub damage: DamageRoll,
}

impl Attacker {
    pub fn new(damage: DamageRoll) -> Self {
        Self { damage }
    }

    pub fn unarmed() -> Self {
        Self::new(DamageRoll::unarmed())
    }
}

/// Result of one resolved attack
#[derive(Debug, Clone)]
pub struct AttackOutcome {
    pub hit: bool,
    pub roll: i32,
    pub needed: i32,
    /// Mitigated damage to apply (0 on a miss)
    pub damage: i32,
    /// Display name of the weapon used
    pub weapon: String,
}

/// Effective attack damage: the wielded weapon when one is equipped,
/// otherwise the attacker's own damage descriptor.
fn attack_damage(attacker: &Creature) -> (DamageRoll, i32, String) {
    if let Some(weapon) = attacker
        .container
        .as_ref()
        .and_then(|c| c.equipment.main_hand())
    {
        if let crate::items::Pickable::Weapon {
            damage,
            hit_bonus,
            damage_bonus,
            ..
        } = &weapon.pickable
        {
            let enh = weapon.enhancement as i32;
            return (
                damage.with_bonus(damage_bonus + enh),
                hit_bonus + enh,
                weapon.name(),
            );
        }
    }
    let base = attacker
        .attacker
        .as_ref()
        .map(|a| a.damage.clone())
        .unwrap_or_else(DamageRoll::unarmed);
    (base, 0, "unarmed".to_string())
}

/// Resolve a single attack. The caller applies the damage and handles the
/// death transition; this only does the math.
pub fn resolve_attack(
    attacker: &Creature,
    target: &Creature,
    data: &GameData,
    dice: &mut Dice,
) -> Result<AttackOutcome, DataError> {
    let strength = data.strength_row(attacker.strength)?;
    let (damage_roll, weapon_hit, weapon_name) = attack_damage(attacker);

    let thaco = attacker.destructible.as_ref().map_or(20, |d| d.thaco);
    let target_ac = target.destructible.as_ref().map_or(10, |d| d.armor_class());
    let needed = thaco - target_ac;

    let mut hit_mod = strength.hit_adj + weapon_hit;
    if attacker.is_ranged {
        hit_mod += data.dexterity_row(attacker.dexterity)?.missile_adj;
    }

    let roll = dice.d20();
    let total = roll + hit_mod;
    if total < needed {
        return Ok(AttackOutcome {
            hit: false,
            roll: total,
            needed,
            damage: 0,
            weapon: weapon_name,
        });
    }

    let target_dr = target.destructible.as_ref().map_or(0, |d| d.dr);
    let raw = damage_roll.roll(dice) + strength.dmg_adj;
    let damage = (raw - target_dr).max(0);

    Ok(AttackOutcome {
        hit: true,
        roll: total,
        needed,
        damage,
        weapon: weapon_name,
    })
}
