//! Confusion: staggering in random directions
//!
//! Wraps the creature's real strategy and gives it back once the count
//! runs out. A confused creature swings at whatever it stumbles into,
//! friend or foe.

use super::Ai;
use crate::actors::ActorId;
use crate::data::DataError;
use crate::game::log::MessageCategory;
use crate::game::{actions, Game};

pub fn update(
    game: &mut Game,
    owner: ActorId,
    turns: i32,
    prev: Box<Ai>,
) -> Result<Ai, DataError> {
    let Some(me) = game.creature(owner) else {
        return Ok(*prev);
    };
    let my_pos = me.pos;
    let name = me.data.name.clone();

    let dx = game.dice.roll(-1, 1);
    let dy = game.dice.roll(-1, 1);
    if dx != 0 || dy != 0 {
        let dest = my_pos.offset(dx, dy);
        match game.creature_id_at(dest) {
            Some(target_id) if target_id != owner => {
                actions::attack(game, owner, target_id)?;
            }
            _ => {
                if game.can_walk(dest) {
                    if let Some(me) = game.creature_mut(owner) {
                        me.pos = dest;
                    }
                }
            }
        }
    }

    let turns = turns - 1;
    if turns <= 0 {
        if game.map.is_in_fov(my_pos.x, my_pos.y) {
            game.message(
                format!("The {name} shakes off the confusion."),
                MessageCategory::Combat,
            );
        }
        Ok(*prev)
    } else {
        Ok(Ai::Confused { turns, prev })
    }
}
