//! Turn scheduler
//!
//! One `tick` per player command. A spent turn advances the world: the
//! hunger clock runs, every AI acts in world order, and corpses from the
//! previous turn are swept.

use log::debug;

use crate::actors::ActorId;
use crate::data::DataError;
use crate::game::actions::{self, TurnOutcome};
use crate::game::input::Command;
use crate::game::log::MessageCategory;
use crate::game::state::{Game, GameStatus};
use crate::ai::player;

pub fn tick(game: &mut Game, command: Command) -> Result<TurnOutcome, DataError> {
    if game.is_over() {
        return Ok(match command {
            Command::Quit => TurnOutcome::Quit,
            _ => TurnOutcome::NoTurn,
        });
    }

    if game.status == GameStatus::Startup {
        game.recompute_fov();
        game.status = GameStatus::Idle;
    }

    let outcome = player::handle_command(game, command)?;

    if outcome == TurnOutcome::TookTurn && !game.is_over() {
        game.status = GameStatus::NewTurn;
        new_turn(game)?;
        if game.status == GameStatus::NewTurn {
            game.status = GameStatus::Idle;
        }
    }

    // A fresh floor after descending; light it before the next draw
    if game.status == GameStatus::Startup {
        game.status = GameStatus::Idle;
    }
    if !game.is_over() {
        game.recompute_fov();
    }
    Ok(outcome)
}

/// Advance the world by one turn
fn new_turn(game: &mut Game) -> Result<(), DataError> {
    game.turn += 1;
    debug!("turn {} begins", game.turn);

    if let Some(state) = game.hunger.tick() {
        game.message(
            format!("You are {}.", state.label().to_lowercase()),
            MessageCategory::Warning,
        );
    }
    if game.hunger.is_starving() {
        let player_id = game.player_id;
        actions::apply_damage(game, player_id, player_id, 1);
    }

    // Every creature acts, in world order. The strategy comes out of the
    // creature by value and whatever it returns goes back in.
    let ids: Vec<ActorId> = game.creatures.iter().map(|c| c.id).collect();
    for id in ids {
        if game.is_over() {
            break;
        }
        let Some(creature) = game.creature_mut(id) else {
            continue;
        };
        if creature.is_dead() {
            continue;
        }
        let Some(ai) = creature.ai.take() else {
            continue;
        };
        let ai = ai.update(game, id)?;
        if let Some(creature) = game.creature_mut(id) {
            // A creature killed mid-round keeps its corpse state
            if creature.is_alive() {
                creature.ai = Some(ai);
            }
        }
    }

    // Corpses linger for one full turn, then vanish
    let turn = game.turn;
    let player_id = game.player_id;
    game.creatures
        .retain(|c| c.id == player_id || c.died_on_turn.map_or(true, |died| died + 1 >= turn));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::{factory, Position};
    use crate::ai::Ai;
    use crate::data::GameData;
    use crate::game::input::TargetChoice;
    use crate::rng::Dice;
    use crate::world::Map;

    fn arena() -> Game {
        let mut game = Game::new(GameData::defaults(), Dice::from_seed(13));
        game.map = Map::open_map(30, 20);
        let player_id = game.player_id;
        game.creatures.retain(|c| c.id == player_id);
        game.items.clear();
        if let Some(p) = game.player_mut() {
            p.pos = Position::new(5, 5);
        }
        game.status = GameStatus::Startup;
        game
    }

    #[test]
    fn first_tick_settles_startup_into_idle() {
        let mut game = arena();
        tick(&mut game, Command::None).unwrap();
        assert_eq!(game.status, GameStatus::Idle);
        assert!(game.map.is_in_fov(5, 5));
        assert_eq!(game.turn, 0);
    }

    #[test]
    fn spent_turns_advance_the_clock_and_free_ones_do_not() {
        let mut game = arena();
        tick(&mut game, Command::Wait).unwrap();
        assert_eq!(game.turn, 1);
        tick(&mut game, Command::None).unwrap();
        assert_eq!(game.turn, 1);
        tick(&mut game, Command::Move { dx: 1, dy: 0 }).unwrap();
        assert_eq!(game.turn, 2);
    }

    #[test]
    fn corpses_linger_one_turn_then_vanish() {
        let mut game = arena();
        let id = game.next_id();
        game.creatures.push(factory::goblin(id, Position::new(20, 15)));
        tick(&mut game, Command::Wait).unwrap();

        // Kill it during this turn
        game.creature_mut(id)
            .unwrap()
            .destructible
            .as_mut()
            .unwrap()
            .take_damage(99);
        let turn = game.turn;
        game.creature_mut(id).unwrap().become_corpse(turn);

        tick(&mut game, Command::Wait).unwrap();
        assert!(game.creature(id).is_some(), "corpse should linger a turn");
        tick(&mut game, Command::Wait).unwrap();
        assert!(game.creature(id).is_none(), "corpse should be swept");
    }

    #[test]
    fn confusion_wears_off_after_its_turns() {
        let mut game = arena();
        let id = game.next_id();
        let mut orc = factory::orc(id, Position::new(25, 18));
        let inner = orc.ai.take().unwrap();
        orc.ai = Some(Ai::Confused {
            turns: 3,
            prev: Box::new(inner),
        });
        game.creatures.push(orc);

        for _ in 0..3 {
            assert!(matches!(
                game.creature(id).unwrap().ai,
                Some(Ai::Confused { .. })
            ));
            tick(&mut game, Command::Wait).unwrap();
        }
        assert!(matches!(
            game.creature(id).unwrap().ai,
            Some(Ai::Monster { .. })
        ));
    }

    #[test]
    fn victory_freezes_the_world() {
        let mut game = arena();
        let id = game.next_id();
        let amulet = factory::amulet(id, Position::new(0, 0));
        game.player_mut()
            .unwrap()
            .container
            .as_mut()
            .unwrap()
            .add(amulet)
            .ok()
            .unwrap();
        tick(&mut game, Command::None).unwrap();
        tick(
            &mut game,
            Command::Use {
                slot: 0,
                target: TargetChoice::Auto,
            },
        )
        .unwrap();
        assert_eq!(game.status, GameStatus::Victory);
        let turn = game.turn;
        tick(&mut game, Command::Wait).unwrap();
        assert_eq!(game.turn, turn, "no more turns after victory");
    }

    #[test]
    fn player_death_sets_defeat() {
        let mut game = arena();
        game.player_mut()
            .unwrap()
            .destructible
            .as_mut()
            .unwrap()
            .take_damage(9999);
        let player_id = game.player_id;
        actions::apply_damage(&mut game, player_id, player_id, 1);
        assert_eq!(game.status, GameStatus::Defeat);
    }
}
