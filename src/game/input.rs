//! Player commands
//!
//! The UI translates keystrokes into these; the simulation only ever sees
//! commands, never raw key events.

use crate::actors::Position;

/// One player intention for a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Move { dx: i32, dy: i32 },
    Wait,
    Pickup,
    /// Use or equip the inventory item at `slot`, with an optional tile
    /// for targeted effects
    Use { slot: usize, target: TargetChoice },
    Drop(usize),
    /// Open or close a door next to the player
    ToggleDoor { dx: i32, dy: i32 },
    /// Fire the wielded missile weapon
    RangedAttack(TargetChoice),
    Descend,
    Quit,
    /// A keystroke the simulation ignores
    None,
}

/// How a targeted effect picks its tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetChoice {
    /// Let the effect find the closest valid creature itself
    Auto,
    Tile(Position),
    /// The player backed out of targeting; no effect, no turn
    Cancelled,
}
