//! Hostile monster behavior
//!
//! Monsters chase the player for a few turns after seeing them, and may
//! keep sniffing them out at longer range.

use super::Ai;
use crate::actors::{ActorId, Position};
use crate::data::DataError;
use crate::game::{actions, Game};

/// Turns of committed pursuit after losing sight of the player
const TRACKING_TURNS: i32 = 3;
/// Beyond this the trail is cold
const SMELL_RANGE: i32 = 15;

pub fn update(game: &mut Game, owner: ActorId, track_turns: i32) -> Result<Ai, DataError> {
    let Some(me) = game.creature(owner) else {
        return Ok(Ai::Monster { track_turns });
    };
    let my_pos = me.pos;
    let player_pos = game.player_pos();

    let mut track = track_turns;
    if game.map.is_in_fov(my_pos.x, my_pos.y) {
        track = TRACKING_TURNS;
    }

    let pursue = if track > 0 {
        track -= 1;
        true
    } else {
        // Out of sight: the occasional lucky sniff keeps the chase alive
        my_pos.tile_distance(player_pos) <= SMELL_RANGE && game.dice.d6() == 1
    };

    if pursue && game.player().is_alive() {
        move_or_attack(game, owner, player_pos)?;
    }
    Ok(Ai::Monster { track_turns: track })
}

/// Step toward the target, sliding along walls; swing when adjacent
pub fn move_or_attack(
    game: &mut Game,
    owner: ActorId,
    target_pos: Position,
) -> Result<(), DataError> {
    let Some(me) = game.creature(owner) else {
        return Ok(());
    };
    let my_pos = me.pos;

    if my_pos.tile_distance(target_pos) >= 2 {
        let dx = (target_pos.x - my_pos.x).signum();
        let dy = (target_pos.y - my_pos.y).signum();
        for (sx, sy) in [(dx, dy), (dx, 0), (0, dy)] {
            if sx == 0 && sy == 0 {
                continue;
            }
            let dest = my_pos.offset(sx, sy);
            if game.can_walk(dest) {
                if let Some(me) = game.creature_mut(owner) {
                    me.pos = dest;
                }
                break;
            }
        }
    } else if let Some(target_id) = game.creature_id_at(target_pos) {
        actions::attack(game, owner, target_id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::factory;
    use crate::data::GameData;
    use crate::game::GameStatus;
    use crate::rng::Dice;

    fn arena() -> Game {
        let mut game = Game::new(GameData::defaults(), Dice::from_seed(2));
        game.map = crate::world::Map::open_map(30, 20);
        let player_id = game.player_id;
        game.creatures.retain(|c| c.id == player_id);
        game.items.clear();
        if let Some(p) = game.player_mut() {
            p.pos = Position::new(5, 5);
        }
        game.status = GameStatus::Idle;
        game.recompute_fov();
        game
    }

    #[test]
    fn visible_monster_closes_the_distance() {
        let mut game = arena();
        let id = game.next_id();
        game.creatures.push(factory::orc(id, Position::new(9, 5)));
        let ai = game.creature_mut(id).unwrap().ai.take().unwrap();
        let ai = ai.update(&mut game, id).unwrap();
        game.creature_mut(id).unwrap().ai = Some(ai);
        let pos = game.creature(id).unwrap().pos;
        assert!(pos.tile_distance(Position::new(5, 5)) < 4);
        assert!(matches!(
            game.creature(id).unwrap().ai,
            Some(Ai::Monster { track_turns: 2 })
        ));
    }

    #[test]
    fn adjacent_monster_attacks_instead_of_moving() {
        let mut game = arena();
        let id = game.next_id();
        game.creatures.push(factory::troll(id, Position::new(6, 5)));
        let hp_before = game.player().destructible.as_ref().unwrap().hp();
        // A troll hits often enough that a few rounds always draw blood
        for _ in 0..10 {
            let ai = game.creature_mut(id).unwrap().ai.take().unwrap();
            let ai = ai.update(&mut game, id).unwrap();
            if let Some(c) = game.creature_mut(id) {
                c.ai = Some(ai);
            }
            if game.status == GameStatus::Defeat {
                break;
            }
        }
        assert_eq!(game.creature(id).unwrap().pos, Position::new(6, 5));
        let hp_after = game
            .creature(game.player_id)
            .map(|p| p.destructible.as_ref().unwrap().hp())
            .unwrap_or(0);
        assert!(hp_after < hp_before);
    }

    #[test]
    fn blocked_diagonal_slides_along_the_wall() {
        let mut game = arena();
        use crate::world::TileType;
        let id = game.next_id();
        game.creatures.push(factory::orc(id, Position::new(9, 8)));
        game.map.set_tile(8, 7, TileType::Wall);
        game.recompute_fov();
        move_or_attack(&mut game, id, Position::new(5, 5)).unwrap();
        let pos = game.creature(id).unwrap().pos;
        assert_ne!(pos, Position::new(9, 8));
        assert_ne!(pos, Position::new(8, 7));
    }
}
