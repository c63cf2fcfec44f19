//! Actor factory
//!
//! Every creature and item species is built here, so spawn tables and
//! stat blocks live in one place.

use super::actor::{ActorData, ActorId, Position};
use super::creature::Creature;
use super::item::{Item, ItemKind};
use crate::ai::Ai;
use crate::combat::{Attacker, Destructible};
use crate::data::{DataError, GameData};
use crate::items::{Container, Pickable};
use crate::rng::{DamageRoll, Dice};

/// The amulet appears from this floor down
pub const AMULET_DEPTH: u32 = 3;

pub fn player(id: ActorId, pos: Position, data: &GameData) -> Creature {
    let mut player = Creature::new(id, pos, ActorData::new('@', "hero", (255, 255, 255)));
    player.strength = 16;
    player.dexterity = 14;
    player.constitution = 14;
    let hp_adj = data
        .constitution_row(player.constitution)
        .map(|row| row.hp_adj)
        .unwrap_or(0);
    player.attacker = Some(Attacker::new(DamageRoll::new(1, 2, "1d2")));
    player.destructible = Some(Destructible::new(
        30 + hp_adj,
        0,
        "your lifeless body",
        0,
        20,
        10,
    ));
    player.container = Some(Container::new(26));
    player.ai = Some(Ai::Player);
    player
}

pub fn goblin(id: ActorId, pos: Position) -> Creature {
    let mut c = Creature::new(id, pos, ActorData::new('g', "goblin", (90, 140, 60)));
    c.strength = 8;
    c.attacker = Some(Attacker::new(DamageRoll::new(1, 4, "1d4")));
    c.destructible = Some(Destructible::new(6, 0, "dead goblin", 15, 20, 8));
    c.ai = Some(Ai::Monster { track_turns: 0 });
    c
}

pub fn orc(id: ActorId, pos: Position) -> Creature {
    let mut c = Creature::new(id, pos, ActorData::new('o', "orc", (63, 127, 63)));
    c.strength = 12;
    c.attacker = Some(Attacker::new(DamageRoll::new(1, 6, "1d6")));
    c.destructible = Some(Destructible::new(10, 0, "dead orc", 35, 19, 7));
    c.ai = Some(Ai::Monster { track_turns: 0 });
    c
}

pub fn troll(id: ActorId, pos: Position) -> Creature {
    let mut c = Creature::new(id, pos, ActorData::new('T', "troll", (40, 100, 40)));
    c.strength = 17;
    c.attacker = Some(Attacker::new(DamageRoll::new(1, 8, "1d8")));
    c.destructible = Some(Destructible::new(16, 1, "troll carcass", 100, 18, 5));
    c.ai = Some(Ai::Monster { track_turns: 0 });
    c
}

pub fn wight(id: ActorId, pos: Position) -> Creature {
    let mut c = Creature::new(id, pos, ActorData::new('W', "barrow-wight", (170, 170, 220)));
    c.strength = 15;
    c.attacker = Some(Attacker::new(DamageRoll::new(2, 8, "2d4")));
    c.destructible = Some(Destructible::new(22, 2, "crumbled wight", 175, 17, 4));
    c.ai = Some(Ai::Monster { track_turns: 0 });
    c
}

pub fn shopkeeper(id: ActorId, pos: Position) -> Creature {
    let mut c = Creature::new(id, pos, ActorData::new('@', "shopkeeper", (220, 180, 60)));
    c.strength = 14;
    c.gold = 200;
    c.attacker = Some(Attacker::new(DamageRoll::new(1, 6, "1d6")));
    c.destructible = Some(Destructible::new(30, 0, "dead shopkeeper", 0, 18, 6));
    c.container = Some(Container::new(26));
    c.ai = Some(Ai::Shopkeeper { cooldown: 0 });
    c
}

/// Spawn-table roll, darker picks deeper down
pub fn random_monster(id: ActorId, pos: Position, depth: u32, dice: &mut Dice) -> Creature {
    let roll = dice.d100() + (depth as i32 - 1) * 10;
    match roll {
        r if r < 40 => goblin(id, pos),
        r if r < 75 => orc(id, pos),
        r if r < 95 => troll(id, pos),
        _ => wight(id, pos),
    }
}

pub fn health_potion(id: ActorId, pos: Position) -> Item {
    Item::new(
        id,
        pos,
        ActorData::new('!', "health potion", (200, 50, 200)),
        ItemKind::Potion,
        Pickable::Healer { amount: 10 },
        10,
    )
}

pub fn lightning_scroll(id: ActorId, pos: Position) -> Item {
    Item::new(
        id,
        pos,
        ActorData::new('?', "scroll of lightning bolt", (240, 240, 60)),
        ItemKind::Scroll,
        Pickable::LightningBolt {
            range: 5,
            damage: 20,
        },
        30,
    )
}

pub fn fireball_scroll(id: ActorId, pos: Position) -> Item {
    Item::new(
        id,
        pos,
        ActorData::new('?', "scroll of fireball", (240, 140, 40)),
        ItemKind::Scroll,
        Pickable::Fireball {
            range: 8,
            radius: 3,
            damage: 12,
        },
        35,
    )
}

pub fn confusion_scroll(id: ActorId, pos: Position) -> Item {
    Item::new(
        id,
        pos,
        ActorData::new('?', "scroll of confusion", (140, 140, 240)),
        ItemKind::Scroll,
        Pickable::Confuser { turns: 10, range: 8 },
        25,
    )
}

pub fn gold_pile(id: ActorId, pos: Position, amount: i32) -> Item {
    Item::new(
        id,
        pos,
        ActorData::new('$', "pile of gold", (230, 200, 50)),
        ItemKind::Gold,
        Pickable::Gold { amount },
        amount,
    )
}

pub fn food_ration(id: ActorId, pos: Position) -> Item {
    Item::new(
        id,
        pos,
        ActorData::new('%', "food ration", (160, 110, 60)),
        ItemKind::Food,
        Pickable::Food { nutrition: 600 },
        5,
    )
}

pub fn leather_armor(id: ActorId, pos: Position) -> Item {
    Item::new(
        id,
        pos,
        ActorData::new('[', "leather armor", (139, 69, 19)),
        ItemKind::Armor,
        Pickable::Armor { ac_bonus: -2 },
        20,
    )
}

pub fn chain_mail(id: ActorId, pos: Position) -> Item {
    Item::new(
        id,
        pos,
        ActorData::new('[', "chain mail", (170, 170, 180)),
        ItemKind::Armor,
        Pickable::Armor { ac_bonus: -4 },
        75,
    )
}

/// The goal of the whole crawl
pub fn amulet(id: ActorId, pos: Position) -> Item {
    Item::new(
        id,
        pos,
        ActorData::new('"', "Amulet of the Barrow", (120, 230, 230)),
        ItemKind::Amulet,
        Pickable::Amulet,
        1000,
    )
}

/// Build a weapon item from its data-table template
pub fn weapon(
    id: ActorId,
    pos: Position,
    name: &str,
    data: &GameData,
) -> Result<Item, DataError> {
    let tpl = data.weapon(name)?;
    let glyph = if tpl.ranged { '}' } else { '/' };
    Ok(Item::new(
        id,
        pos,
        ActorData::new(glyph, tpl.name.clone(), (170, 170, 170)),
        ItemKind::Weapon,
        Pickable::Weapon {
            damage: tpl.damage.clone(),
            hands: tpl.hands,
            hit_bonus: tpl.hit_bonus,
            damage_bonus: tpl.damage_bonus,
            ranged: tpl.ranged,
        },
        tpl.value,
    ))
}

/// Loot-table roll
pub fn random_item(
    id: ActorId,
    pos: Position,
    depth: u32,
    data: &GameData,
    dice: &mut Dice,
) -> Item {
    match dice.d100() {
        r if r < 30 => health_potion(id, pos),
        r if r < 40 => food_ration(id, pos),
        r if r < 50 => gold_pile(id, pos, dice.roll(5, 30) * depth as i32),
        r if r < 60 => lightning_scroll(id, pos),
        r if r < 68 => fireball_scroll(id, pos),
        r if r < 76 => confusion_scroll(id, pos),
        r if r < 86 => {
            let names = ["dagger", "short sword", "long sword", "war hammer", "battle axe"];
            let name = names[dice.roll(0, names.len() as i32 - 1) as usize];
            let mut item = weapon(id, pos, name, data)
                .unwrap_or_else(|_| health_potion(id, pos));
            if dice.d10() == 1 {
                item.enhance(1);
            }
            item
        }
        r if r < 95 => leather_armor(id, pos),
        _ => chain_mail(id, pos),
    }
}
