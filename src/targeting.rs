//! Target selection and validation
//!
//! Range is measured in tile distance (diagonals count as one) and every
//! ranged effect also needs an unbroken line of sight.

use crate::actors::{ActorId, Position};
use crate::game::Game;

/// Why a chosen tile was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetError {
    OutOfRange,
    NoLineOfSight,
    NoCreatureThere,
}

impl TargetError {
    pub fn message(&self) -> &'static str {
        match self {
            TargetError::OutOfRange => "That is out of range.",
            TargetError::NoLineOfSight => "You cannot see that spot.",
            TargetError::NoCreatureThere => "There is nothing there.",
        }
    }
}

/// Validate a tile chosen by `requester`. `max_range` is inclusive.
/// When `need_creature` is set the tile must hold a living creature other
/// than the requester.
pub fn validate_target(
    game: &Game,
    requester: ActorId,
    target: Position,
    max_range: i32,
    need_creature: bool,
) -> Result<(), TargetError> {
    let from = game
        .creature(requester)
        .map(|c| c.pos)
        .unwrap_or_else(|| game.player_pos());

    if from.tile_distance(target) > max_range {
        return Err(TargetError::OutOfRange);
    }
    if !game.map.has_los(from, target) {
        return Err(TargetError::NoLineOfSight);
    }
    if need_creature {
        match game.creature_at(target) {
            Some(c) if c.id != requester => {}
            _ => return Err(TargetError::NoCreatureThere),
        }
    }
    Ok(())
}

/// Closest living creature to `from` within `max_range`, excluding
/// `exclude`. Distance ties keep the first one found in world order.
pub fn closest_creature(
    game: &Game,
    from: Position,
    max_range: i32,
    exclude: ActorId,
) -> Option<ActorId> {
    let mut best: Option<(ActorId, i32)> = None;
    for c in &game.creatures {
        if c.id == exclude || c.is_dead() {
            continue;
        }
        let dist = from.tile_distance(c.pos);
        if dist > max_range || !game.map.has_los(from, c.pos) {
            continue;
        }
        match best {
            Some((_, d)) if d <= dist => {}
            _ => best = Some((c.id, dist)),
        }
    }
    best.map(|(id, _)| id)
}

/// Every living creature within `radius` of `center`, the player included
pub fn creatures_in_radius(game: &Game, center: Position, radius: i32) -> Vec<ActorId> {
    game.creatures
        .iter()
        .filter(|c| c.is_alive() && center.tile_distance(c.pos) <= radius)
        .map(|c| c.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::{ActorData, Creature};
    use crate::combat::Destructible;
    use crate::data::GameData;
    use crate::game::{Game, GameStatus};
    use crate::rng::Dice;
    use crate::world::TileType;

    fn arena() -> Game {
        let mut game = Game::new(GameData::defaults(), Dice::from_seed(1));
        // Swap the generated floor for a bare room
        game.map = crate::world::Map::open_map(30, 20);
        let player_id = game.player_id;
        game.creatures.retain(|c| c.id == player_id);
        game.items.clear();
        if let Some(p) = game.player_mut() {
            p.pos = Position::new(5, 5);
        }
        game.status = GameStatus::Idle;
        game
    }

    fn spawn_orc(game: &mut Game, pos: Position) -> ActorId {
        let id = game.next_id();
        let mut orc = Creature::new(id, pos, ActorData::new('o', "orc", (63, 127, 63)));
        orc.destructible = Some(Destructible::new(10, 0, "dead orc", 35, 18, 7));
        game.creatures.push(orc);
        id
    }

    #[test]
    fn max_range_is_inclusive() {
        let mut game = arena();
        spawn_orc(&mut game, Position::new(10, 5));
        let player = game.player_id;
        assert!(validate_target(&game, player, Position::new(10, 5), 5, true).is_ok());
        assert_eq!(
            validate_target(&game, player, Position::new(10, 5), 4, true),
            Err(TargetError::OutOfRange)
        );
    }

    #[test]
    fn walls_block_targeting() {
        let mut game = arena();
        for y in 1..19 {
            game.map.set_tile(8, y, TileType::Wall);
        }
        let player = game.player_id;
        assert_eq!(
            validate_target(&game, player, Position::new(12, 5), 20, false),
            Err(TargetError::NoLineOfSight)
        );
    }

    #[test]
    fn requester_is_never_their_own_target() {
        let game = arena();
        let player = game.player_id;
        assert_eq!(
            validate_target(&game, player, game.player_pos(), 5, true),
            Err(TargetError::NoCreatureThere)
        );
    }

    #[test]
    fn closest_creature_prefers_nearer_and_keeps_first_on_tie() {
        let mut game = arena();
        let near = spawn_orc(&mut game, Position::new(7, 5));
        let _far = spawn_orc(&mut game, Position::new(12, 5));
        let tied = spawn_orc(&mut game, Position::new(5, 7));
        let player = game.player_id;
        let found = closest_creature(&game, game.player_pos(), 10, player);
        assert_eq!(found, Some(near));
        // Same distance as `near`; world order keeps `near`
        assert_ne!(found, Some(tied));
    }

    #[test]
    fn radius_query_includes_the_player() {
        let mut game = arena();
        let orc = spawn_orc(&mut game, Position::new(6, 6));
        let hit = creatures_in_radius(&game, Position::new(5, 5), 2);
        assert!(hit.contains(&game.player_id));
        assert!(hit.contains(&orc));
    }

    #[test]
    fn corpses_are_not_targets() {
        let mut game = arena();
        let orc = spawn_orc(&mut game, Position::new(7, 5));
        game.creature_mut(orc)
            .unwrap()
            .destructible
            .as_mut()
            .unwrap()
            .take_damage(99);
        let player = game.player_id;
        assert_eq!(closest_creature(&game, game.player_pos(), 10, player), None);
    }
}
