//! Game state
//!
//! One `Game` owns the whole simulation: the floor grid, every creature
//! and floor item, the dice, the data tables, and the turn scheduler's
//! status flag.

use serde::{Deserialize, Serialize};

use crate::actors::{factory, ActorId, Creature, Item, Position};
use crate::data::GameData;
use crate::game::hunger::Hunger;
use crate::game::log::{MessageCategory, MessageLog};
use crate::rng::Dice;
use crate::world::{compute_fov, Map};

pub const MAP_WIDTH: i32 = 80;
pub const MAP_HEIGHT: i32 = 43;
pub const FOV_RADIUS: i32 = 10;

/// Scheduler phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// A fresh floor; the first tick computes FOV and settles into Idle
    Startup,
    /// Waiting for player input
    Idle,
    /// The player spent a turn; the world now acts
    NewTurn,
    Victory,
    Defeat,
}

#[derive(Debug)]
pub struct Game {
    pub map: Map,
    pub creatures: Vec<Creature>,
    pub items: Vec<Item>,
    pub player_id: ActorId,
    pub data: GameData,
    pub dice: Dice,
    pub log: MessageLog,
    pub turn: u64,
    pub status: GameStatus,
    pub hunger: Hunger,
    pub depth: u32,
    next_id: ActorId,
}

impl Game {
    /// Start a brand-new run on floor 1
    pub fn new(data: GameData, mut dice: Dice) -> Self {
        let map = Map::generate(MAP_WIDTH, MAP_HEIGHT, 1, &mut dice);
        let mut game = Self {
            map,
            creatures: Vec::new(),
            items: Vec::new(),
            player_id: 0,
            data,
            dice,
            log: MessageLog::new(),
            turn: 0,
            status: GameStatus::Startup,
            hunger: Hunger::new(),
            depth: 1,
            next_id: 1,
        };
        let player = factory::player(game.next_id(), game.map.start_pos, &game.data);
        game.player_id = player.id;
        game.creatures.push(player);
        game.populate_floor();
        game.log.add(
            "You descend into the barrow. Find the amulet and live.",
            0,
            MessageCategory::System,
        );
        game
    }

    /// Rebuild from loaded parts; the caller restores the player and log
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        map: Map,
        creatures: Vec<Creature>,
        items: Vec<Item>,
        player_id: ActorId,
        data: GameData,
        dice: Dice,
        log: MessageLog,
        turn: u64,
        status: GameStatus,
        hunger: Hunger,
        depth: u32,
        next_id: ActorId,
    ) -> Self {
        Self {
            map,
            creatures,
            items,
            player_id,
            data,
            dice,
            log,
            turn,
            status,
            hunger,
            depth,
            next_id,
        }
    }

    pub fn next_id(&mut self) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn peek_next_id(&self) -> ActorId {
        self.next_id
    }

    /// Monsters and loot for the current floor
    fn populate_floor(&mut self) {
        let spawns = self.map.spawn_positions(8);
        if spawns.is_empty() {
            return;
        }
        let depth = self.depth;

        let n_monsters = self.dice.roll(4, 8) + depth as i32;
        for _ in 0..n_monsters {
            let pos = spawns[self.dice.roll(0, spawns.len() as i32 - 1) as usize];
            if self.creature_at(pos).is_some() {
                continue;
            }
            let id = self.next_id();
            let monster = factory::random_monster(id, pos, depth, &mut self.dice);
            self.creatures.push(monster);
        }

        let n_items = self.dice.roll(3, 6);
        for _ in 0..n_items {
            let pos = spawns[self.dice.roll(0, spawns.len() as i32 - 1) as usize];
            let id = self.next_id();
            let item = factory::random_item(id, pos, depth, &self.data, &mut self.dice);
            self.items.push(item);
        }

        // One shopkeeper per floor, minding their corner
        let pos = spawns[self.dice.roll(0, spawns.len() as i32 - 1) as usize];
        if self.creature_at(pos).is_none() {
            let id = self.next_id();
            self.creatures.push(factory::shopkeeper(id, pos));
        }

        // The amulet waits on the deepest floors
        if depth >= factory::AMULET_DEPTH {
            let pos = spawns[self.dice.roll(0, spawns.len() as i32 - 1) as usize];
            let id = self.next_id();
            self.items.push(factory::amulet(id, pos));
        }
    }

    /// Carve the next floor, carrying the player (and their pack) down
    pub fn descend(&mut self) {
        self.depth += 1;
        self.map = Map::generate(MAP_WIDTH, MAP_HEIGHT, self.depth, &mut self.dice);
        let player_id = self.player_id;
        self.creatures.retain(|c| c.id == player_id);
        self.items.clear();
        let start = self.map.start_pos;
        if let Some(player) = self.player_mut() {
            player.pos = start;
        }
        self.populate_floor();
        self.status = GameStatus::Startup;
        self.log.add(
            format!("You descend to level {}.", self.depth),
            self.turn,
            MessageCategory::System,
        );
    }

    pub fn index_of(&self, id: ActorId) -> Option<usize> {
        self.creatures.iter().position(|c| c.id == id)
    }

    pub fn creature(&self, id: ActorId) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    pub fn creature_mut(&mut self, id: ActorId) -> Option<&mut Creature> {
        self.creatures.iter_mut().find(|c| c.id == id)
    }

    pub fn player(&self) -> &Creature {
        self.creature(self.player_id)
            .expect("player creature always present")
    }

    pub fn player_mut(&mut self) -> Option<&mut Creature> {
        let id = self.player_id;
        self.creature_mut(id)
    }

    pub fn player_pos(&self) -> Position {
        self.player().pos
    }

    /// Living blocking creature at a tile
    pub fn creature_at(&self, pos: Position) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.pos == pos && c.blocks())
    }

    pub fn creature_id_at(&self, pos: Position) -> Option<ActorId> {
        self.creature_at(pos).map(|c| c.id)
    }

    /// Index of the first floor item lying on a tile
    pub fn item_index_at(&self, pos: Position) -> Option<usize> {
        self.items.iter().position(|i| i.pos == pos)
    }

    /// A tile is enterable when the terrain allows it and no living
    /// creature stands there
    pub fn can_walk(&self, pos: Position) -> bool {
        self.map.is_walkable(pos.x, pos.y) && self.creature_at(pos).is_none()
    }

    pub fn recompute_fov(&mut self) {
        let origin = self.player_pos();
        compute_fov(&mut self.map, origin, FOV_RADIUS);
    }

    pub fn message(&mut self, text: impl Into<String>, category: MessageCategory) {
        let turn = self.turn;
        self.log.add(text, turn, category);
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Victory | GameStatus::Defeat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_game() -> Game {
        Game::new(GameData::defaults(), Dice::from_seed(7))
    }

    #[test]
    fn new_game_starts_in_startup_with_a_live_player() {
        let game = test_game();
        assert_eq!(game.status, GameStatus::Startup);
        assert!(game.player().is_alive());
        assert_eq!(game.player_pos(), game.map.start_pos);
    }

    #[test]
    fn ids_are_unique_across_the_floor() {
        let game = test_game();
        let mut ids: Vec<_> = game
            .creatures
            .iter()
            .map(|c| c.id)
            .chain(game.items.iter().map(|i| i.id))
            .collect();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn descend_keeps_the_player_and_resets_the_floor() {
        let mut game = test_game();
        let player_id = game.player_id;
        game.descend();
        assert_eq!(game.depth, 2);
        assert_eq!(game.status, GameStatus::Startup);
        assert!(game.creature(player_id).is_some());
        assert_eq!(game.player_pos(), game.map.start_pos);
    }

    #[test]
    fn occupied_tiles_are_not_walkable() {
        let game = test_game();
        assert!(!game.can_walk(game.player_pos()));
    }
}
