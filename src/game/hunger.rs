//! Hunger clock
//!
//! Player-only. Nutrition drains one point per turn; food puts it back.
//! At zero the player starts losing hit points.

use serde::{Deserialize, Serialize};

const STARTING_NUTRITION: i32 = 900;
const MAX_NUTRITION: i32 = 1500;
const HUNGRY_AT: i32 = 300;
const WEAK_AT: i32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HungerState {
    Fed,
    Hungry,
    Weak,
    Starving,
}

impl HungerState {
    pub fn label(&self) -> &'static str {
        match self {
            HungerState::Fed => "",
            HungerState::Hungry => "Hungry",
            HungerState::Weak => "Weak",
            HungerState::Starving => "Starving",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hunger {
    nutrition: i32,
}

impl Default for Hunger {
    fn default() -> Self {
        Self::new()
    }
}

impl Hunger {
    pub fn new() -> Self {
        Self {
            nutrition: STARTING_NUTRITION,
        }
    }

    pub fn state(&self) -> HungerState {
        if self.nutrition <= 0 {
            HungerState::Starving
        } else if self.nutrition < WEAK_AT {
            HungerState::Weak
        } else if self.nutrition < HUNGRY_AT {
            HungerState::Hungry
        } else {
            HungerState::Fed
        }
    }

    /// One turn passes. Returns the state only when it changed, so the
    /// caller can announce the transition once.
    pub fn tick(&mut self) -> Option<HungerState> {
        let before = self.state();
        self.nutrition = (self.nutrition - 1).max(0);
        let after = self.state();
        (before != after).then_some(after)
    }

    pub fn eat(&mut self, nutrition: i32) {
        self.nutrition = (self.nutrition + nutrition).min(MAX_NUTRITION);
    }

    pub fn is_starving(&self) -> bool {
        self.state() == HungerState::Starving
    }

    pub fn nutrition(&self) -> i32 {
        self.nutrition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_transitions_fire_exactly_once() {
        let mut hunger = Hunger { nutrition: HUNGRY_AT + 1 };
        assert_eq!(hunger.tick(), None);
        assert_eq!(hunger.tick(), Some(HungerState::Hungry));
        assert_eq!(hunger.tick(), None);
    }

    #[test]
    fn eating_clamps_at_the_ceiling() {
        let mut hunger = Hunger::new();
        hunger.eat(100_000);
        assert_eq!(hunger.nutrition(), MAX_NUTRITION);
        assert_eq!(hunger.state(), HungerState::Fed);
    }

    #[test]
    fn starvation_floor_is_zero() {
        let mut hunger = Hunger { nutrition: 1 };
        hunger.tick();
        assert!(hunger.is_starving());
        hunger.tick();
        assert_eq!(hunger.nutrition(), 0);
    }
}
