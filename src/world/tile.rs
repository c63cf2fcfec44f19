//! Tile definitions
//!
//! Different tile types and their properties.

use serde::{Deserialize, Serialize};

/// A single tile in the map
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tile {
    pub tile_type: TileType,
    pub explored: bool,
    #[serde(skip)]
    pub visible: bool,
}

impl Tile {
    pub fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            explored: false,
            visible: false,
        }
    }

    pub fn is_walkable(&self) -> bool {
        self.tile_type.is_walkable()
    }

    pub fn is_transparent(&self) -> bool {
        self.tile_type.is_transparent()
    }

    pub fn glyph(&self) -> char {
        self.tile_type.glyph()
    }

    pub fn fg_color(&self, lit: bool) -> (u8, u8, u8) {
        if lit {
            self.tile_type.fg_color()
        } else {
            // Dimmed when remembered but out of sight
            let (r, g, b) = self.tile_type.fg_color();
            (r / 3, g / 3, b / 3)
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(TileType::Wall)
    }
}

/// Types of tiles in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Floor,
    Wall,
    DoorClosed,
    DoorOpen,
    StairsDown,
    /// Hidden until stepped on; deals a small bite of damage
    Trap,
}

impl TileType {
    pub fn is_walkable(&self) -> bool {
        matches!(
            self,
            TileType::Floor | TileType::DoorOpen | TileType::StairsDown | TileType::Trap
        )
    }

    pub fn is_transparent(&self) -> bool {
        !matches!(self, TileType::Wall | TileType::DoorClosed)
    }

    pub fn is_door(&self) -> bool {
        matches!(self, TileType::DoorClosed | TileType::DoorOpen)
    }

    pub fn glyph(&self) -> char {
        match self {
            TileType::Floor => '.',
            TileType::Wall => '#',
            TileType::DoorClosed => '+',
            TileType::DoorOpen => '/',
            TileType::StairsDown => '>',
            TileType::Trap => '^',
        }
    }

    pub fn fg_color(&self) -> (u8, u8, u8) {
        match self {
            TileType::Floor => (80, 80, 80),
            TileType::Wall => (130, 110, 90),
            TileType::DoorClosed => (139, 90, 43),
            TileType::DoorOpen => (139, 90, 43),
            TileType::StairsDown => (200, 200, 200),
            TileType::Trap => (180, 60, 180),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_doors_block_movement_and_sight() {
        assert!(!TileType::DoorClosed.is_walkable());
        assert!(!TileType::DoorClosed.is_transparent());
        assert!(TileType::DoorOpen.is_walkable());
        assert!(TileType::DoorOpen.is_transparent());
    }

    #[test]
    fn walls_are_opaque_floors_are_not() {
        assert!(!TileType::Wall.is_transparent());
        assert!(TileType::Floor.is_transparent());
    }
}
