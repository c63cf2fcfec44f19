//! Entity model
//!
//! Everything placed in the world is an actor: a grid position plus a
//! render identity. Creatures and items layer optional capabilities on top
//! by composition.

pub mod actor;
pub mod creature;
pub mod factory;
pub mod item;

pub use actor::{ActorData, ActorId, Position};
pub use creature::Creature;
pub use item::{Item, ItemKind};
