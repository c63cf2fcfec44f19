//! Item system

pub mod equipment;
pub mod inventory;
pub mod pickable;

pub use equipment::{EquipSlot, Equipment};
pub use inventory::Container;
pub use pickable::Pickable;
