//! Equipment slots
//!
//! Equipping moves an item out of the inventory list into a named slot;
//! unequipping moves it back. Armor class is recomputed by the owner once
//! per toggle (see `combat::update_armor_class`).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::actors::{ActorId, Item};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    MainHand,
    OffHand,
    Body,
}

impl EquipSlot {
    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::MainHand => "main hand",
            EquipSlot::OffHand => "off hand",
            EquipSlot::Body => "body",
        }
    }

    pub fn all() -> &'static [EquipSlot] {
        &[EquipSlot::MainHand, EquipSlot::OffHand, EquipSlot::Body]
    }
}

/// Items currently worn or wielded
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Equipment {
    slots: HashMap<EquipSlot, Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Place an item in a slot, returning whatever was there before
    pub fn equip(&mut self, slot: EquipSlot, mut item: Item) -> Option<Item> {
        item.equipped = true;
        let mut prev = self.slots.insert(slot, item);
        if let Some(ref mut old) = prev {
            old.equipped = false;
        }
        prev
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Option<Item> {
        let mut item = self.slots.remove(&slot);
        if let Some(ref mut it) = item {
            it.equipped = false;
        }
        item
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&Item> {
        self.slots.get(&slot)
    }

    pub fn is_empty(&self, slot: EquipSlot) -> bool {
        !self.slots.contains_key(&slot)
    }

    /// Slot holding the item with this id, if equipped
    pub fn slot_of(&self, id: ActorId) -> Option<EquipSlot> {
        self.slots
            .iter()
            .find(|(_, item)| item.id == id)
            .map(|(slot, _)| *slot)
    }

    pub fn all_items(&self) -> impl Iterator<Item = &Item> {
        self.slots.values()
    }

    /// Total armor class contribution of everything equipped.
    /// Enhancement improves (lowers) the bonus further.
    pub fn ac_bonus(&self) -> i32 {
        self.slots
            .values()
            .map(|item| item.pickable.ac_bonus() - item.enhancement as i32)
            .sum()
    }

    /// The wielded main-hand weapon, if any
    pub fn main_hand(&self) -> Option<&Item> {
        self.get(EquipSlot::MainHand)
    }
}
