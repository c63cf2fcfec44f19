//! Combat system

pub mod attacker;
pub mod destructible;

pub use attacker::{resolve_attack, AttackOutcome, Attacker};
pub use destructible::{update_armor_class, Destructible};
