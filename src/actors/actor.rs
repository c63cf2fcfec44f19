//! Actor basics: position and render identity

use serde::{Deserialize, Serialize};

/// Stable identity of a creature or item, unique within a game
pub type ActorId = u64;

/// Position in the game world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: the tile metric used for every range check
    pub fn tile_distance(&self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }

    /// Adjacent or same tile
    pub fn is_adjacent(&self, other: Position) -> bool {
        self.tile_distance(other) <= 1
    }
}

/// Visual identity of an actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorData {
    /// Character to display
    pub glyph: char,
    pub name: String,
    /// Foreground color (RGB)
    pub color: (u8, u8, u8),
}

impl ActorData {
    pub fn new(glyph: char, name: impl Into<String>, color: (u8, u8, u8)) -> Self {
        Self {
            glyph,
            name: name.into(),
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_distance_is_chebyshev() {
        let a = Position::new(0, 0);
        assert_eq!(a.tile_distance(Position::new(3, 1)), 3);
        assert_eq!(a.tile_distance(Position::new(-2, -2)), 2);
        assert_eq!(a.tile_distance(a), 0);
    }

    #[test]
    fn adjacency_includes_diagonals() {
        let a = Position::new(5, 5);
        assert!(a.is_adjacent(Position::new(6, 6)));
        assert!(!a.is_adjacent(Position::new(7, 5)));
    }
}
