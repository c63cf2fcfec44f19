//! World mutations: attacks, item effects, pickup and drop
//!
//! Both the player and the AIs funnel through `attack`; item use is
//! dispatched on the item's `Pickable` variant.

use log::debug;

use crate::actors::{ActorId, Position};
use crate::ai::Ai;
use crate::combat::{resolve_attack, update_armor_class};
use crate::data::{DataError, HandRequirement};
use crate::game::input::TargetChoice;
use crate::game::log::MessageCategory;
use crate::game::state::{Game, GameStatus};
use crate::items::{EquipSlot, Pickable};
use crate::targeting::{closest_creature, creatures_in_radius, validate_target};

/// Whether the player's command consumed their turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    TookTurn,
    NoTurn,
    Quit,
}

/// Resolve one melee or missile attack and apply its consequences:
/// damage, the death transition, experience, and defeat detection.
pub fn attack(game: &mut Game, attacker_id: ActorId, target_id: ActorId) -> Result<(), DataError> {
    let Some(a_idx) = game.index_of(attacker_id) else {
        return Ok(());
    };
    let Some(t_idx) = game.index_of(target_id) else {
        return Ok(());
    };
    if a_idx == t_idx {
        return Ok(());
    }

    let outcome = {
        let attacker = &game.creatures[a_idx];
        let target = &game.creatures[t_idx];
        resolve_attack(attacker, target, &game.data, &mut game.dice)?
    };

    let attacker_name = game.creatures[a_idx].data.name.clone();
    let target_name = game.creatures[t_idx].data.name.clone();
    debug!(
        "{attacker_name} attacks {target_name}: rolled {} vs {} needed",
        outcome.roll, outcome.needed
    );

    if !outcome.hit {
        game.message(
            format!("The {attacker_name} misses the {target_name}."),
            MessageCategory::Combat,
        );
        return Ok(());
    }

    if outcome.damage == 0 {
        game.message(
            format!("The {attacker_name} hits the {target_name} but cannot pierce its hide."),
            MessageCategory::Combat,
        );
        return Ok(());
    }

    game.message(
        format!(
            "The {attacker_name} hits the {target_name} for {} damage.",
            outcome.damage
        ),
        MessageCategory::Combat,
    );
    apply_damage(game, attacker_id, target_id, outcome.damage);
    Ok(())
}

/// Apply raw damage to a creature and handle its death. `source` earns
/// the experience when the target dies; traps and starvation pass the
/// victim's own id, which awards nothing.
pub fn apply_damage(game: &mut Game, source: ActorId, target_id: ActorId, damage: i32) {
    let Some(target) = game.creature_mut(target_id) else {
        return;
    };
    let Some(destructible) = target.destructible.as_mut() else {
        return;
    };
    destructible.take_damage(damage);
    if !destructible.is_dead() {
        return;
    }

    let xp = destructible.xp;
    let turn = game.turn;
    let target_name = game
        .creature_mut(target_id)
        .map(|c| {
            c.become_corpse(turn);
            c.data.name.clone()
        })
        .unwrap_or_default();

    if target_id == game.player_id {
        game.status = GameStatus::Defeat;
        game.message("You die...", MessageCategory::Warning);
        return;
    }

    game.message(format!("The {target_name} is destroyed!"), MessageCategory::Combat);
    if xp > 0 && source != target_id {
        if let Some(killer) = game
            .creature_mut(source)
            .and_then(|c| c.destructible.as_mut())
        {
            killer.xp += xp;
        }
        if source == game.player_id {
            game.message(format!("You gain {xp} experience."), MessageCategory::System);
        }
    }
}

/// Pick up the first item under the player's feet
pub fn pickup(game: &mut Game) -> TurnOutcome {
    let pos = game.player_pos();
    let Some(idx) = game.item_index_at(pos) else {
        game.message("There is nothing here to pick up.", MessageCategory::System);
        return TurnOutcome::NoTurn;
    };
    let item = game.items.remove(idx);
    let name = item.name();
    let Some(container) = game.player_mut().and_then(|p| p.container.as_mut()) else {
        game.items.insert(idx, item);
        return TurnOutcome::NoTurn;
    };
    match container.add(item) {
        Ok(()) => {
            game.message(format!("You pick up the {name}."), MessageCategory::Item);
            TurnOutcome::TookTurn
        }
        Err(item) => {
            game.items.insert(idx, item);
            game.message("Your pack is full.", MessageCategory::Warning);
            TurnOutcome::NoTurn
        }
    }
}

/// Drop an inventory item at the player's feet. Equipped items are
/// unequipped first, with the armor class recomputed.
pub fn drop_item(game: &mut Game, slot: usize) -> Result<TurnOutcome, DataError> {
    let player_id = game.player_id;
    let pos = game.player_pos();
    let (item, was_worn) = {
        let Some(container) = game.player_mut().and_then(|p| p.container.as_mut()) else {
            return Ok(TurnOutcome::NoTurn);
        };
        let Some(listed) = container.listed_item(slot) else {
            return Ok(TurnOutcome::NoTurn);
        };
        if listed.equipped {
            // Worn gear comes off straight onto the floor
            let id = listed.id;
            let Some(equip_slot) = container.equipment.slot_of(id) else {
                return Ok(TurnOutcome::NoTurn);
            };
            match container.equipment.unequip(equip_slot) {
                Some(item) => (item, true),
                None => return Ok(TurnOutcome::NoTurn),
            }
        } else {
            let Some(item) = container.remove(slot) else {
                return Ok(TurnOutcome::NoTurn);
            };
            (item, false)
        }
    };
    if was_worn && matches!(item.pickable, Pickable::Weapon { ranged: true, .. }) {
        if let Some(player) = game.player_mut() {
            player.is_ranged = false;
        }
    }
    refresh_armor(game, player_id)?;
    let mut item = item;
    item.pos = pos;
    item.equipped = false;
    game.message(format!("You drop the {}.", item.name()), MessageCategory::Item);
    game.items.push(item);
    Ok(TurnOutcome::TookTurn)
}

/// Use, eat, read, or equip the inventory item at `slot`
pub fn use_item(
    game: &mut Game,
    slot: usize,
    target: TargetChoice,
) -> Result<TurnOutcome, DataError> {
    let player_id = game.player_id;
    let Some(item) = game
        .player()
        .container
        .as_ref()
        .and_then(|c| c.listed_item(slot))
        .cloned()
    else {
        game.message("No such item.", MessageCategory::System);
        return Ok(TurnOutcome::NoTurn);
    };

    match item.pickable.clone() {
        Pickable::Healer { amount } => use_healer(game, slot, amount),
        Pickable::LightningBolt { range, damage } => use_lightning(game, slot, range, damage),
        Pickable::Fireball {
            range,
            radius,
            damage,
        } => use_fireball(game, slot, target, range, radius, damage),
        Pickable::Confuser { turns, range } => use_confuser(game, slot, target, turns, range),
        Pickable::Gold { amount } => {
            consume(game, slot);
            if let Some(player) = game.player_mut() {
                player.gold += amount;
            }
            game.message(
                format!("You add {amount} gold to your purse."),
                MessageCategory::Item,
            );
            Ok(TurnOutcome::TookTurn)
        }
        Pickable::Amulet => {
            game.status = GameStatus::Victory;
            game.message(
                "The amulet blazes with light. The barrow releases you!",
                MessageCategory::System,
            );
            Ok(TurnOutcome::TookTurn)
        }
        Pickable::Food { nutrition } => {
            consume(game, slot);
            game.hunger.eat(nutrition);
            game.message(format!("You eat the {}.", item.name()), MessageCategory::Item);
            Ok(TurnOutcome::TookTurn)
        }
        Pickable::Armor { .. } | Pickable::Weapon { .. } => {
            toggle_equip(game, player_id, slot)
        }
    }
}

fn use_healer(game: &mut Game, slot: usize, amount: i32) -> Result<TurnOutcome, DataError> {
    let healed = game
        .player_mut()
        .and_then(|p| p.destructible.as_mut())
        .map(|d| d.heal(amount))
        .unwrap_or(0);
    if healed == 0 {
        // Already whole; the potion stays in the pack
        game.message("You are already at full health.", MessageCategory::System);
        return Ok(TurnOutcome::NoTurn);
    }
    consume(game, slot);
    game.message(
        format!("Your wounds close. You recover {healed} hit points."),
        MessageCategory::Item,
    );
    Ok(TurnOutcome::TookTurn)
}

fn use_lightning(
    game: &mut Game,
    slot: usize,
    range: i32,
    damage: i32,
) -> Result<TurnOutcome, DataError> {
    let player_id = game.player_id;
    let from = game.player_pos();
    let Some(target_id) = closest_creature(game, from, range, player_id) else {
        game.message("No enemy is close enough to strike.", MessageCategory::System);
        return Ok(TurnOutcome::NoTurn);
    };
    consume(game, slot);
    let name = game
        .creature(target_id)
        .map(|c| c.data.name.clone())
        .unwrap_or_default();
    game.message(
        format!("A lightning bolt strikes the {name} for {damage} damage!"),
        MessageCategory::Combat,
    );
    apply_damage(game, player_id, target_id, damage);
    Ok(TurnOutcome::TookTurn)
}

fn use_fireball(
    game: &mut Game,
    slot: usize,
    target: TargetChoice,
    range: i32,
    radius: i32,
    damage: i32,
) -> Result<TurnOutcome, DataError> {
    let player_id = game.player_id;
    let tile = match target {
        TargetChoice::Tile(pos) => pos,
        TargetChoice::Cancelled | TargetChoice::Auto => return Ok(TurnOutcome::NoTurn),
    };
    if let Err(err) = validate_target(game, player_id, tile, range, false) {
        game.message(err.message(), MessageCategory::Warning);
        return Ok(TurnOutcome::NoTurn);
    }
    consume(game, slot);
    game.message(
        format!("The fireball explodes, burning everything within {radius} tiles!"),
        MessageCategory::Combat,
    );
    // The caster burns too if they stand inside the blast
    for id in creatures_in_radius(game, tile, radius) {
        let name = game
            .creature(id)
            .map(|c| c.data.name.clone())
            .unwrap_or_default();
        game.message(
            format!("The {name} burns for {damage} damage."),
            MessageCategory::Combat,
        );
        apply_damage(game, player_id, id, damage);
    }
    Ok(TurnOutcome::TookTurn)
}

fn use_confuser(
    game: &mut Game,
    slot: usize,
    target: TargetChoice,
    turns: i32,
    range: i32,
) -> Result<TurnOutcome, DataError> {
    let player_id = game.player_id;
    let tile = match target {
        TargetChoice::Tile(pos) => pos,
        TargetChoice::Cancelled | TargetChoice::Auto => return Ok(TurnOutcome::NoTurn),
    };
    if let Err(err) = validate_target(game, player_id, tile, range, true) {
        game.message(err.message(), MessageCategory::Warning);
        return Ok(TurnOutcome::NoTurn);
    }
    consume(game, slot);
    let Some(target_id) = game.creature_id_at(tile) else {
        return Ok(TurnOutcome::TookTurn);
    };
    let name = game
        .creature(target_id)
        .map(|c| c.data.name.clone())
        .unwrap_or_default();
    if let Some(creature) = game.creature_mut(target_id) {
        // Wrap whatever the creature was running; it comes back when the
        // confusion wears off
        if let Some(prev) = creature.ai.take() {
            creature.ai = Some(Ai::Confused {
                turns,
                prev: Box::new(prev),
            });
        }
    }
    game.message(
        format!("The eyes of the {name} go blank as it starts to stagger."),
        MessageCategory::Combat,
    );
    Ok(TurnOutcome::TookTurn)
}

/// Equip an unequipped weapon or armor piece, or take an equipped one
/// off. Single armor class recompute either way.
fn toggle_equip(game: &mut Game, owner: ActorId, slot: usize) -> Result<TurnOutcome, DataError> {
    let outcome: Result<(String, bool, bool), &str> = {
        let Some(container) = game
            .creature_mut(owner)
            .and_then(|c| c.container.as_mut())
        else {
            return Ok(TurnOutcome::NoTurn);
        };
        let Some(item) = container.listed_item(slot) else {
            return Ok(TurnOutcome::NoTurn);
        };

        if item.equipped {
            let id = item.id;
            let Some(equip_slot) = container.equipment.slot_of(id) else {
                return Ok(TurnOutcome::NoTurn);
            };
            if container.is_full() {
                // No room in the pack to take it off into
                Err("Your pack is too full to take that off.")
            } else {
                let Some(item) = container.equipment.unequip(equip_slot) else {
                    return Ok(TurnOutcome::NoTurn);
                };
                let name = item.name();
                // The hands are free again; drop the missile flag with them
                let was_ranged =
                    matches!(item.pickable, Pickable::Weapon { ranged: true, .. });
                let _ = container.add(item);
                Ok((format!("You take off the {name}."), was_ranged, false))
            }
        } else {
            let (equip_slot, hands) = match &item.pickable {
                Pickable::Armor { .. } => (EquipSlot::Body, None),
                Pickable::Weapon {
                    hands: HandRequirement::OffHandOnly,
                    ..
                } => (EquipSlot::OffHand, Some(HandRequirement::OffHandOnly)),
                Pickable::Weapon { hands, .. } => (EquipSlot::MainHand, Some(*hands)),
                _ => return Ok(TurnOutcome::NoTurn),
            };
            let is_ranged = matches!(item.pickable, Pickable::Weapon { ranged: true, .. });
            let two_handed_wielded = matches!(
                container.equipment.main_hand().map(|w| &w.pickable),
                Some(Pickable::Weapon {
                    hands: HandRequirement::TwoHanded,
                    ..
                })
            );
            if equip_slot == EquipSlot::OffHand && two_handed_wielded {
                Err("Both your hands are already full.")
            } else if hands == Some(HandRequirement::TwoHanded)
                && !container.equipment.is_empty(EquipSlot::OffHand)
                && container.is_full()
            {
                Err("Your pack is too full to free your other hand.")
            } else {
                // A two-hander claims the off hand as well
                if hands == Some(HandRequirement::TwoHanded) {
                    if let Some(off) = container.equipment.unequip(EquipSlot::OffHand) {
                        let _ = container.add(off);
                    }
                }
                let Some(item) = container.remove(slot) else {
                    return Ok(TurnOutcome::NoTurn);
                };
                let name = item.name();
                if let Some(previous) = container.equipment.equip(equip_slot, item) {
                    // Whatever was in the slot goes back in the pack
                    let _ = container.add(previous);
                }
                Ok((format!("You ready the {name}."), false, is_ranged))
            }
        }
    };

    let (text, cleared_ranged, set_ranged) = match outcome {
        Ok(parts) => parts,
        Err(text) => {
            game.message(text, MessageCategory::Warning);
            return Ok(TurnOutcome::NoTurn);
        }
    };
    if let Some(creature) = game.creature_mut(owner) {
        if cleared_ranged {
            creature.is_ranged = false;
        }
        if set_ranged {
            creature.is_ranged = true;
        }
    }
    refresh_armor(game, owner)?;
    game.message(text, MessageCategory::Item);
    Ok(TurnOutcome::TookTurn)
}

/// Fire the wielded missile weapon at a creature
pub fn ranged_attack(game: &mut Game, target: TargetChoice) -> Result<TurnOutcome, DataError> {
    let player_id = game.player_id;
    if !game.player().is_ranged {
        game.message("You have no missile weapon readied.", MessageCategory::System);
        return Ok(TurnOutcome::NoTurn);
    }
    const MISSILE_RANGE: i32 = 8;
    let target_id = match target {
        TargetChoice::Cancelled => return Ok(TurnOutcome::NoTurn),
        TargetChoice::Auto => {
            match closest_creature(game, game.player_pos(), MISSILE_RANGE, player_id) {
                Some(id) => id,
                None => {
                    game.message("No target in range.", MessageCategory::System);
                    return Ok(TurnOutcome::NoTurn);
                }
            }
        }
        TargetChoice::Tile(tile) => {
            if let Err(err) = validate_target(game, player_id, tile, MISSILE_RANGE, true) {
                game.message(err.message(), MessageCategory::Warning);
                return Ok(TurnOutcome::NoTurn);
            }
            match game.creature_id_at(tile) {
                Some(id) => id,
                None => return Ok(TurnOutcome::NoTurn),
            }
        }
    };
    attack(game, player_id, target_id)?;
    Ok(TurnOutcome::TookTurn)
}

fn consume(game: &mut Game, slot: usize) {
    let _ = game
        .player_mut()
        .and_then(|p| p.container.as_mut())
        .and_then(|c| c.remove(slot));
}

fn refresh_armor(game: &mut Game, owner: ActorId) -> Result<(), DataError> {
    let data = game.data.clone();
    if let Some(creature) = game.creature_mut(owner) {
        update_armor_class(creature, &data)?;
    }
    Ok(())
}

/// Report what is lying at a tile the player just stepped onto
pub fn describe_floor(game: &mut Game, pos: Position) {
    let names: Vec<String> = game
        .items
        .iter()
        .filter(|i| i.pos == pos)
        .map(|i| i.name())
        .collect();
    match names.len() {
        0 => {}
        1 => game.message(format!("There is a {} here.", names[0]), MessageCategory::Item),
        n => game.message(
            format!("There are {n} things lying here."),
            MessageCategory::Item,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::{factory, ActorData, Creature, Item, ItemKind};
    use crate::combat::Destructible;
    use crate::data::GameData;
    use crate::rng::{DamageRoll, Dice};

    fn arena() -> Game {
        let mut game = Game::new(GameData::defaults(), Dice::from_seed(5));
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

    fn give(game: &mut Game, item: Item) -> usize {
        let container = game
            .player_mut()
            .unwrap()
            .container
            .as_mut()
            .unwrap();
        container.add(item).ok().unwrap();
        container.len() - 1
    }

    fn spawn_orc(game: &mut Game, pos: Position) -> ActorId {
        let id = game.next_id();
        let mut orc = Creature::new(id, pos, ActorData::new('o', "orc", (63, 127, 63)));
        orc.destructible = Some(Destructible::new(10, 0, "dead orc", 35, 18, 7));
        orc.ai = Some(Ai::Monster { track_turns: 0 });
        game.creatures.push(orc);
        id
    }

    #[test]
    fn healer_restores_and_is_consumed() {
        let mut game = arena();
        game.player_mut()
            .unwrap()
            .destructible
            .as_mut()
            .unwrap()
            .take_damage(10);
        let hp_before = game.player().destructible.as_ref().unwrap().hp();
        let id = game.next_id();
        let slot = give(&mut game, factory::health_potion(id, Position::new(0, 0)));
        let outcome = use_item(&mut game, slot, TargetChoice::Auto).unwrap();
        assert_eq!(outcome, TurnOutcome::TookTurn);
        assert!(game.player().destructible.as_ref().unwrap().hp() > hp_before);
        assert!(game.player().container.as_ref().unwrap().is_empty());
    }

    #[test]
    fn healer_at_full_health_is_not_consumed() {
        let mut game = arena();
        let id = game.next_id();
        let slot = give(&mut game, factory::health_potion(id, Position::new(0, 0)));
        let outcome = use_item(&mut game, slot, TargetChoice::Auto).unwrap();
        assert_eq!(outcome, TurnOutcome::NoTurn);
        assert_eq!(game.player().container.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn gold_always_consumes_into_the_purse() {
        let mut game = arena();
        let id = game.next_id();
        let slot = give(&mut game, factory::gold_pile(id, Position::new(0, 0), 25));
        let outcome = use_item(&mut game, slot, TargetChoice::Auto).unwrap();
        assert_eq!(outcome, TurnOutcome::TookTurn);
        assert_eq!(game.player().gold, 25);
        assert!(game.player().container.as_ref().unwrap().is_empty());
    }

    #[test]
    fn amulet_wins_the_game_and_stays() {
        let mut game = arena();
        let id = game.next_id();
        let slot = give(&mut game, factory::amulet(id, Position::new(0, 0)));
        let outcome = use_item(&mut game, slot, TargetChoice::Auto).unwrap();
        assert_eq!(outcome, TurnOutcome::TookTurn);
        assert_eq!(game.status, GameStatus::Victory);
        assert_eq!(game.player().container.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn confuser_wraps_the_victims_ai_and_needs_a_creature() {
        let mut game = arena();
        let orc = spawn_orc(&mut game, Position::new(7, 5));
        let id = game.next_id();
        let slot = give(&mut game, factory::confusion_scroll(id, Position::new(0, 0)));

        // Empty tile: rejected, scroll kept, no turn
        let outcome =
            use_item(&mut game, slot, TargetChoice::Tile(Position::new(9, 9))).unwrap();
        assert_eq!(outcome, TurnOutcome::NoTurn);
        assert_eq!(game.player().container.as_ref().unwrap().len(), 1);

        let outcome =
            use_item(&mut game, slot, TargetChoice::Tile(Position::new(7, 5))).unwrap();
        assert_eq!(outcome, TurnOutcome::TookTurn);
        match game.creature(orc).unwrap().ai.as_ref().unwrap() {
            Ai::Confused { turns, prev } => {
                assert_eq!(*turns, 10);
                assert!(matches!(**prev, Ai::Monster { .. }));
            }
            other => panic!("expected confusion, got {other:?}"),
        }
    }

    #[test]
    fn cancelled_targeting_costs_nothing() {
        let mut game = arena();
        let id = game.next_id();
        let slot = give(&mut game, factory::fireball_scroll(id, Position::new(0, 0)));
        let outcome = use_item(&mut game, slot, TargetChoice::Cancelled).unwrap();
        assert_eq!(outcome, TurnOutcome::NoTurn);
        assert_eq!(game.player().container.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn fireball_burns_the_caster_too() {
        let mut game = arena();
        let id = game.next_id();
        let slot = give(&mut game, factory::fireball_scroll(id, Position::new(0, 0)));
        let hp_before = game.player().destructible.as_ref().unwrap().hp();
        let pos = game.player_pos();
        let outcome = use_item(&mut game, slot, TargetChoice::Tile(pos.offset(1, 0))).unwrap();
        assert_eq!(outcome, TurnOutcome::TookTurn);
        assert!(game.player().destructible.as_ref().unwrap().hp() < hp_before);
    }

    #[test]
    fn lightning_strikes_the_nearest_enemy() {
        let mut game = arena();
        let near = spawn_orc(&mut game, Position::new(7, 5));
        let far = spawn_orc(&mut game, Position::new(9, 5));
        let id = game.next_id();
        let slot = give(&mut game, factory::lightning_scroll(id, Position::new(0, 0)));
        use_item(&mut game, slot, TargetChoice::Auto).unwrap();
        let near_hp = game.creature(near).unwrap().destructible.as_ref().unwrap().hp();
        let far_hp = game.creature(far).unwrap().destructible.as_ref().unwrap().hp();
        assert!(near_hp < 10);
        assert_eq!(far_hp, 10);
    }

    #[test]
    fn equip_then_unequip_restores_bare_armor_class() {
        let mut game = arena();
        let base_ac = game.player().destructible.as_ref().unwrap().armor_class();
        let id = game.next_id();
        let slot = give(&mut game, factory::chain_mail(id, Position::new(0, 0)));
        use_item(&mut game, slot, TargetChoice::Auto).unwrap();
        let mailed_ac = game.player().destructible.as_ref().unwrap().armor_class();
        assert!(mailed_ac < base_ac);
        assert_eq!(
            game.player()
                .container
                .as_ref()
                .unwrap()
                .equipment
                .get(EquipSlot::Body)
                .map(|i| i.id),
            Some(id)
        );
        // The worn piece is now the only listed item; using it again
        // takes it off
        let outcome = use_item(&mut game, 0, TargetChoice::Auto).unwrap();
        assert_eq!(outcome, TurnOutcome::TookTurn);
        assert_eq!(
            game.player().destructible.as_ref().unwrap().armor_class(),
            base_ac
        );
        assert_eq!(game.player().container.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn wielding_a_bow_sets_the_missile_flag() {
        let mut game = arena();
        let id = game.next_id();
        let bow = factory::weapon(id, Position::new(0, 0), "long bow", &game.data).unwrap();
        let slot = give(&mut game, bow);
        use_item(&mut game, slot, TargetChoice::Auto).unwrap();
        assert!(game.player().is_ranged);
    }

    #[test]
    fn pack_full_leaves_the_item_on_the_floor() {
        let mut game = arena();
        let cap = game.player().container.as_ref().unwrap().capacity();
        for _ in 0..cap {
            let id = game.next_id();
            give(&mut game, factory::health_potion(id, Position::new(0, 0)));
        }
        let id = game.next_id();
        let pos = game.player_pos();
        game.items.push(factory::health_potion(id, pos));
        let outcome = pickup(&mut game);
        assert_eq!(outcome, TurnOutcome::NoTurn);
        assert_eq!(game.items.len(), 1);
    }

    fn parrying_dagger(game: &mut Game) -> Item {
        let id = game.next_id();
        Item::new(
            id,
            Position::new(0, 0),
            ActorData::new('/', "parrying dagger", (170, 170, 170)),
            ItemKind::Weapon,
            Pickable::Weapon {
                damage: DamageRoll::new(1, 4, "1d4"),
                hands: HandRequirement::OffHandOnly,
                hit_bonus: 0,
                damage_bonus: 0,
                ranged: false,
            },
            5,
        )
    }

    #[test]
    fn killing_blow_awards_the_victims_experience() {
        let mut game = arena();
        let orc = spawn_orc(&mut game, Position::new(6, 5));
        let player_id = game.player_id;
        let xp_before = game.player().destructible.as_ref().unwrap().xp;
        apply_damage(&mut game, player_id, orc, 10);
        assert!(game.creature(orc).unwrap().is_dead());
        assert_eq!(
            game.player().destructible.as_ref().unwrap().xp,
            xp_before + 35
        );
    }

    #[test]
    fn two_hander_clears_the_off_hand() {
        let mut game = arena();
        let dagger = parrying_dagger(&mut game);
        let slot = give(&mut game, dagger);
        use_item(&mut game, slot, TargetChoice::Auto).unwrap();
        assert!(game
            .player()
            .container
            .as_ref()
            .unwrap()
            .equipment
            .get(EquipSlot::OffHand)
            .is_some());

        let id = game.next_id();
        let sword = factory::weapon(id, Position::new(0, 0), "greatsword", &game.data).unwrap();
        let slot = give(&mut game, sword);
        let outcome = use_item(&mut game, slot, TargetChoice::Auto).unwrap();
        assert_eq!(outcome, TurnOutcome::TookTurn);
        let container = game.player().container.as_ref().unwrap();
        assert_eq!(container.equipment.main_hand().map(|w| w.id), Some(id));
        assert!(container.equipment.is_empty(EquipSlot::OffHand));
        // The displaced dagger is back in the pack
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn off_hand_is_blocked_while_wielding_a_two_hander() {
        let mut game = arena();
        let id = game.next_id();
        let sword = factory::weapon(id, Position::new(0, 0), "greatsword", &game.data).unwrap();
        let slot = give(&mut game, sword);
        use_item(&mut game, slot, TargetChoice::Auto).unwrap();

        let dagger = parrying_dagger(&mut game);
        let slot = give(&mut game, dagger);
        let outcome = use_item(&mut game, slot, TargetChoice::Auto).unwrap();
        assert_eq!(outcome, TurnOutcome::NoTurn);
        let container = game.player().container.as_ref().unwrap();
        assert!(container.equipment.is_empty(EquipSlot::OffHand));
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn dropping_worn_armor_takes_it_off_first() {
        let mut game = arena();
        let base_ac = game.player().destructible.as_ref().unwrap().armor_class();
        let id = game.next_id();
        let slot = give(&mut game, factory::chain_mail(id, Position::new(0, 0)));
        use_item(&mut game, slot, TargetChoice::Auto).unwrap();
        assert!(game.player().destructible.as_ref().unwrap().armor_class() < base_ac);

        // The worn mail is the only listed item
        let outcome = drop_item(&mut game, 0).unwrap();
        assert_eq!(outcome, TurnOutcome::TookTurn);
        assert_eq!(
            game.player().destructible.as_ref().unwrap().armor_class(),
            base_ac
        );
        assert!(game.player().container.as_ref().unwrap().is_empty());
        let dropped = game.items.iter().find(|i| i.id == id).unwrap();
        assert!(!dropped.equipped);
        assert_eq!(dropped.pos, game.player_pos());
    }
}
