//! Shopkeeper behavior
//!
//! Not hostile: ambles toward the player when visible and hawks their
//! wares when adjacent, then leaves the player alone for a while.

use super::Ai;
use crate::actors::ActorId;
use crate::game::log::MessageCategory;
use crate::game::Game;

/// Turns of silence after a sales pitch
const HAIL_COOLDOWN: i32 = 10;

pub fn update(game: &mut Game, owner: ActorId, cooldown: i32) -> Ai {
    let Some(me) = game.creature(owner) else {
        return Ai::Shopkeeper { cooldown };
    };
    let my_pos = me.pos;
    let player_pos = game.player_pos();

    if cooldown > 0 {
        return Ai::Shopkeeper {
            cooldown: cooldown - 1,
        };
    }

    if my_pos.is_adjacent(player_pos) {
        game.message(
            "\"Wares for coin, friend. Browse before something eats you.\"",
            MessageCategory::System,
        );
        return Ai::Shopkeeper {
            cooldown: HAIL_COOLDOWN,
        };
    }

    // Drift toward a visible customer, diagonal steps first
    if game.map.is_in_fov(my_pos.x, my_pos.y) && game.player().is_alive() {
        let dx = (player_pos.x - my_pos.x).signum();
        let dy = (player_pos.y - my_pos.y).signum();
        let candidates = if dx != 0 && dy != 0 {
            [(dx, dy), (dx, 0), (0, dy)]
        } else if dx != 0 {
            [(dx, 1), (dx, -1), (dx, 0)]
        } else {
            [(1, dy), (-1, dy), (0, dy)]
        };
        for (sx, sy) in candidates {
            let dest = my_pos.offset(sx, sy);
            if game.can_walk(dest) {
                if let Some(me) = game.creature_mut(owner) {
                    me.pos = dest;
                }
                break;
            }
        }
    }

    Ai::Shopkeeper { cooldown: 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::{factory, Position};
    use crate::data::GameData;
    use crate::game::GameStatus;
    use crate::rng::Dice;

    fn arena() -> Game {
        let mut game = Game::new(GameData::defaults(), Dice::from_seed(4));
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
    fn adjacent_shopkeeper_hawks_then_goes_quiet() {
        let mut game = arena();
        let id = game.next_id();
        game.creatures.push(factory::shopkeeper(id, Position::new(6, 5)));
        let before = game.log.len();

        let ai = game.creature_mut(id).unwrap().ai.take().unwrap();
        let ai = ai.update(&mut game, id).unwrap();
        assert!(matches!(ai, Ai::Shopkeeper { cooldown: 10 }));
        assert_eq!(game.log.len(), before + 1);
        game.creature_mut(id).unwrap().ai = Some(ai);

        // On cooldown: no second pitch, counter ticks down
        let ai = game.creature_mut(id).unwrap().ai.take().unwrap();
        let ai = ai.update(&mut game, id).unwrap();
        assert!(matches!(ai, Ai::Shopkeeper { cooldown: 9 }));
        assert_eq!(game.log.len(), before + 1);
    }

    #[test]
    fn shopkeeper_approaches_a_visible_customer() {
        let mut game = arena();
        let id = game.next_id();
        game.creatures.push(factory::shopkeeper(id, Position::new(10, 9)));
        let dist_before = game
            .creature(id)
            .unwrap()
            .pos
            .tile_distance(game.player_pos());
        let ai = game.creature_mut(id).unwrap().ai.take().unwrap();
        let _ = ai.update(&mut game, id).unwrap();
        let dist_after = game
            .creature(id)
            .unwrap()
            .pos
            .tile_distance(game.player_pos());
        assert!(dist_after < dist_before);
    }

    #[test]
    fn shopkeeper_never_attacks() {
        let mut game = arena();
        let id = game.next_id();
        game.creatures.push(factory::shopkeeper(id, Position::new(6, 5)));
        let hp_before = game.player().destructible.as_ref().unwrap().hp();
        for _ in 0..20 {
            let ai = game.creature_mut(id).unwrap().ai.take().unwrap();
            let ai = ai.update(&mut game, id).unwrap();
            game.creature_mut(id).unwrap().ai = Some(ai);
        }
        assert_eq!(game.player().destructible.as_ref().unwrap().hp(), hp_before);
    }
}
