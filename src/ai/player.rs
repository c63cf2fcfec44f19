//! Player command handling
//!
//! Translates one `Command` into world effects and reports whether it
//! cost the player their turn.

use crate::data::DataError;
use crate::game::actions::{self, TurnOutcome};
use crate::game::input::Command;
use crate::game::log::MessageCategory;
use crate::game::Game;
use crate::world::TileType;

pub fn handle_command(game: &mut Game, command: Command) -> Result<TurnOutcome, DataError> {
    match command {
        Command::Move { dx, dy } => move_or_interact(game, dx, dy),
        Command::Wait => Ok(TurnOutcome::TookTurn),
        Command::Pickup => Ok(actions::pickup(game)),
        Command::Use { slot, target } => actions::use_item(game, slot, target),
        Command::Drop(slot) => actions::drop_item(game, slot),
        Command::ToggleDoor { dx, dy } => Ok(toggle_door(game, dx, dy)),
        Command::RangedAttack(target) => actions::ranged_attack(game, target),
        Command::Descend => Ok(descend(game)),
        Command::Quit => Ok(TurnOutcome::Quit),
        Command::None => Ok(TurnOutcome::NoTurn),
    }
}

/// Movement doubles as melee and door handling: bumping a creature
/// attacks it, bumping a closed door opens it.
fn move_or_interact(game: &mut Game, dx: i32, dy: i32) -> Result<TurnOutcome, DataError> {
    let player_id = game.player_id;
    let from = game.player_pos();
    let dest = from.offset(dx, dy);
    if !game.map.in_bounds(dest.x, dest.y) {
        return Ok(TurnOutcome::NoTurn);
    }

    if let Some(target_id) = game.creature_id_at(dest) {
        actions::attack(game, player_id, target_id)?;
        return Ok(TurnOutcome::TookTurn);
    }

    let tile = game.map.get_tile(dest.x, dest.y).map(|t| t.tile_type);
    if tile == Some(TileType::DoorClosed) {
        game.map.toggle_door(dest.x, dest.y);
        game.message("You push the door open.", MessageCategory::System);
        return Ok(TurnOutcome::TookTurn);
    }

    if !game.map.is_walkable(dest.x, dest.y) {
        return Ok(TurnOutcome::NoTurn);
    }

    if let Some(player) = game.player_mut() {
        player.pos = dest;
    }

    if tile == Some(TileType::Trap) {
        let damage = game.dice.d6();
        game.message(
            format!("A hidden spike bites your leg for {damage} damage!"),
            MessageCategory::Warning,
        );
        actions::apply_damage(game, player_id, player_id, damage);
    }

    actions::describe_floor(game, dest);
    Ok(TurnOutcome::TookTurn)
}

fn toggle_door(game: &mut Game, dx: i32, dy: i32) -> TurnOutcome {
    let dest = game.player_pos().offset(dx, dy);
    if game.creature_at(dest).is_some() {
        game.message("Someone is standing in the doorway.", MessageCategory::System);
        return TurnOutcome::NoTurn;
    }
    let was_closed = game.map.get_tile(dest.x, dest.y).map(|t| t.tile_type)
        == Some(TileType::DoorClosed);
    if game.map.toggle_door(dest.x, dest.y) {
        if was_closed {
            game.message("The door creaks open.", MessageCategory::System);
        } else {
            game.message("You pull the door shut.", MessageCategory::System);
        }
        TurnOutcome::TookTurn
    } else {
        game.message("There is no door there.", MessageCategory::System);
        TurnOutcome::NoTurn
    }
}

fn descend(game: &mut Game) -> TurnOutcome {
    let pos = game.player_pos();
    if game.map.get_tile(pos.x, pos.y).map(|t| t.tile_type) == Some(TileType::StairsDown) {
        game.descend();
        TurnOutcome::TookTurn
    } else {
        game.message("There are no stairs here.", MessageCategory::System);
        TurnOutcome::NoTurn
    }
}
