//! Map data structure
//!
//! The 2D grid representing a dungeon floor.

use serde::{Deserialize, Serialize};

use super::tile::{Tile, TileType};
use crate::actors::Position;
use crate::rng::Dice;

/// A dungeon floor map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Map {
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<Tile>,
    pub depth: u32,
    /// Start position for the player
    pub start_pos: Position,
    /// Stairs down to the next floor
    pub exit_pos: Position,
}

const MAX_ROOMS: i32 = 12;
const ROOM_MIN: i32 = 4;
const ROOM_MAX: i32 = 10;

#[derive(Debug, Clone, Copy)]
struct Room {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

impl Room {
    fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    fn intersects(&self, other: &Room) -> bool {
        self.x1 <= other.x2 + 1
            && self.x2 >= other.x1 - 1
            && self.y1 <= other.y2 + 1
            && self.y2 >= other.y1 - 1
    }
}

impl Map {
    /// Create a new map filled with walls
    pub fn new(width: i32, height: i32, depth: u32) -> Self {
        let tiles = vec![Tile::default(); (width * height) as usize];
        Self {
            width,
            height,
            tiles,
            depth,
            start_pos: Position::new(0, 0),
            exit_pos: Position::new(0, 0),
        }
    }

    /// Carve a random floor of rectangular rooms joined by L-corridors.
    /// Start is the first room's center, the stairs sit in the last.
    pub fn generate(width: i32, height: i32, depth: u32, dice: &mut Dice) -> Self {
        let mut map = Map::new(width, height, depth);
        let mut rooms: Vec<Room> = Vec::new();

        for _ in 0..MAX_ROOMS {
            let w = dice.roll(ROOM_MIN, ROOM_MAX);
            let h = dice.roll(ROOM_MIN, ROOM_MAX.min(height - 4));
            let x = dice.roll(1, (width - w - 2).max(1));
            let y = dice.roll(1, (height - h - 2).max(1));
            let room = Room {
                x1: x,
                y1: y,
                x2: x + w - 1,
                y2: y + h - 1,
            };
            if rooms.iter().any(|r| r.intersects(&room)) {
                continue;
            }
            map.carve_room(&room);
            if let Some(prev) = rooms.last() {
                map.carve_corridor(prev.center(), room.center(), dice);
            }
            rooms.push(room);
        }

        // Degenerate roll streaks can reject everything; fall back to one
        // hall so the floor is always playable.
        if rooms.is_empty() {
            let room = Room {
                x1: 1,
                y1: 1,
                x2: width - 2,
                y2: height - 2,
            };
            map.carve_room(&room);
            rooms.push(room);
        }

        map.start_pos = rooms[0].center();
        map.exit_pos = rooms[rooms.len() - 1].center();
        map.set_tile(map.exit_pos.x, map.exit_pos.y, TileType::StairsDown);

        // A couple of traps on open floor, away from the entrance
        for _ in 0..dice.roll(1, 3) {
            let room = rooms[dice.roll(0, rooms.len() as i32 - 1) as usize];
            let pos = Position::new(
                dice.roll(room.x1, room.x2),
                dice.roll(room.y1, room.y2),
            );
            if map.is_walkable(pos.x, pos.y)
                && pos != map.start_pos
                && pos != map.exit_pos
            {
                map.set_tile(pos.x, pos.y, TileType::Trap);
            }
        }

        map
    }

    fn carve_room(&mut self, room: &Room) {
        for y in room.y1..=room.y2 {
            for x in room.x1..=room.x2 {
                self.set_tile(x, y, TileType::Floor);
            }
        }
    }

    fn carve_corridor(&mut self, from: Position, to: Position, dice: &mut Dice) {
        let (mut x, mut y) = (from.x, from.y);
        // Horizontal-first or vertical-first, coin flip
        let horizontal_first = dice.d2() == 1;
        let carve = |map: &mut Map, x: i32, y: i32| {
            if map.get_tile(x, y).map_or(false, |t| t.tile_type == TileType::Wall) {
                map.set_tile(x, y, TileType::Floor);
            }
        };
        if horizontal_first {
            while x != to.x {
                x += (to.x - x).signum();
                carve(self, x, y);
            }
            while y != to.y {
                y += (to.y - y).signum();
                carve(self, x, y);
            }
        } else {
            while y != to.y {
                y += (to.y - y).signum();
                carve(self, x, y);
            }
            while x != to.x {
                x += (to.x - x).signum();
                carve(self, x, y);
            }
        }
    }

    #[inline]
    pub fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        if self.in_bounds(x, y) {
            Some(&self.tiles[self.xy_to_idx(x, y)])
        } else {
            None
        }
    }

    pub fn get_tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            Some(&mut self.tiles[idx])
        } else {
            None
        }
    }

    pub fn set_tile(&mut self, x: i32, y: i32, tile_type: TileType) {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            self.tiles[idx].tile_type = tile_type;
        }
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(false, |t| t.is_walkable())
    }

    /// Check if a position blocks line of sight
    pub fn is_opaque(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(true, |t| !t.is_transparent())
    }

    pub fn is_door(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(false, |t| t.tile_type.is_door())
    }

    /// Open a closed door or close an open one. Returns false when the
    /// tile is not a door.
    pub fn toggle_door(&mut self, x: i32, y: i32) -> bool {
        let Some(tile) = self.get_tile_mut(x, y) else {
            return false;
        };
        match tile.tile_type {
            TileType::DoorClosed => {
                tile.tile_type = TileType::DoorOpen;
                true
            }
            TileType::DoorOpen => {
                tile.tile_type = TileType::DoorClosed;
                true
            }
            _ => false,
        }
    }

    pub fn mark_explored(&mut self, x: i32, y: i32) {
        if let Some(tile) = self.get_tile_mut(x, y) {
            tile.explored = true;
        }
    }

    pub fn set_visible(&mut self, x: i32, y: i32, visible: bool) {
        if let Some(tile) = self.get_tile_mut(x, y) {
            tile.visible = visible;
            if visible {
                tile.explored = true;
            }
        }
    }

    pub fn clear_visibility(&mut self) {
        for tile in &mut self.tiles {
            tile.visible = false;
        }
    }

    pub fn is_in_fov(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(false, |t| t.visible)
    }

    /// Straight-line visibility between two tiles, walking a Bresenham
    /// line and stopping at the first opaque tile. Endpoints do not block
    /// themselves.
    pub fn has_los(&self, from: Position, to: Position) -> bool {
        let mut x = from.x;
        let mut y = from.y;
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = (to.x - from.x).signum();
        let sy = (to.y - from.y).signum();
        let mut err = dx + dy;

        loop {
            if x == to.x && y == to.y {
                return true;
            }
            if (x != from.x || y != from.y) && self.is_opaque(x, y) {
                return false;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Get all walkable positions (for spawning)
    pub fn walkable_positions(&self) -> Vec<Position> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_walkable())
            .map(|(idx, _)| {
                let idx = idx as i32;
                Position::new(idx % self.width, idx / self.width)
            })
            .collect()
    }

    /// Walkable tiles at least `min_dist` from the player start
    pub fn spawn_positions(&self, min_dist: i32) -> Vec<Position> {
        self.walkable_positions()
            .into_iter()
            .filter(|pos| pos.tile_distance(self.start_pos) >= min_dist)
            .collect()
    }

    /// A small fully-open test floor
    #[cfg(test)]
    pub fn open_map(width: i32, height: i32) -> Self {
        let mut map = Map::new(width, height, 1);
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                map.set_tile(x, y, TileType::Floor);
            }
        }
        map.start_pos = Position::new(1, 1);
        map.exit_pos = Position::new(width - 2, height - 2);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_floor_connects_start_to_stairs() {
        for seed in 0..8 {
            let mut dice = Dice::from_seed(seed);
            let map = Map::generate(80, 45, 1, &mut dice);
            assert!(map.is_walkable(map.start_pos.x, map.start_pos.y));
            assert_eq!(
                map.get_tile(map.exit_pos.x, map.exit_pos.y).unwrap().tile_type,
                TileType::StairsDown
            );
            // Flood fill from start must reach the stairs
            let mut seen = vec![false; (map.width * map.height) as usize];
            let mut stack = vec![map.start_pos];
            seen[map.xy_to_idx(map.start_pos.x, map.start_pos.y)] = true;
            while let Some(pos) = stack.pop() {
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        let (nx, ny) = (pos.x + dx, pos.y + dy);
                        if map.is_walkable(nx, ny) && !seen[map.xy_to_idx(nx, ny)] {
                            seen[map.xy_to_idx(nx, ny)] = true;
                            stack.push(Position::new(nx, ny));
                        }
                    }
                }
            }
            assert!(seen[map.xy_to_idx(map.exit_pos.x, map.exit_pos.y)]);
        }
    }

    #[test]
    fn los_blocked_by_wall() {
        let mut map = Map::open_map(20, 10);
        for y in 1..9 {
            map.set_tile(10, y, TileType::Wall);
        }
        assert!(!map.has_los(Position::new(2, 5), Position::new(18, 5)));
        assert!(map.has_los(Position::new(2, 5), Position::new(8, 5)));
    }

    #[test]
    fn los_to_adjacent_and_self() {
        let map = Map::open_map(10, 10);
        assert!(map.has_los(Position::new(3, 3), Position::new(3, 3)));
        assert!(map.has_los(Position::new(3, 3), Position::new(4, 4)));
    }

    #[test]
    fn closed_door_blocks_los_until_opened() {
        let mut map = Map::open_map(20, 10);
        for y in 1..9 {
            map.set_tile(10, y, TileType::Wall);
        }
        map.set_tile(10, 5, TileType::DoorClosed);
        assert!(!map.has_los(Position::new(2, 5), Position::new(18, 5)));
        assert!(map.toggle_door(10, 5));
        assert!(map.has_los(Position::new(2, 5), Position::new(18, 5)));
    }

    #[test]
    fn toggle_door_rejects_plain_floor() {
        let mut map = Map::open_map(10, 10);
        assert!(!map.toggle_door(5, 5));
    }
}
