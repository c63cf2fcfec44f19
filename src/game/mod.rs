//! Game module: state, scheduler, commands, and world mutations

pub mod actions;
pub mod hunger;
pub mod input;
pub mod log;
pub mod state;
pub mod turn;

pub use actions::TurnOutcome;
pub use input::{Command, TargetChoice};
pub use state::{Game, GameStatus};
pub use turn::tick;
