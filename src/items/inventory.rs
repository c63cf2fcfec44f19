//! Inventory: the owned item list of a creature

use serde::{Deserialize, Serialize};

use super::equipment::{EquipSlot, Equipment};
use crate::actors::{ActorId, Item};

/// A creature's carried items and equipment slots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    capacity: usize,
    pub items: Vec<Item>,
    pub equipment: Equipment,
}

impl Container {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
            equipment: Equipment::new(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Add an item; hands it back when the container is full
    pub fn add(&mut self, item: Item) -> Result<(), Item> {
        if self.is_full() {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn remove(&mut self, index: usize) -> Option<Item> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn remove_by_id(&mut self, id: ActorId) -> Option<Item> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn index_of(&self, id: ActorId) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Combined listing: pack items first, then worn gear in slot order
    pub fn listed_item(&self, index: usize) -> Option<&Item> {
        if index < self.items.len() {
            self.items.get(index)
        } else {
            EquipSlot::all()
                .iter()
                .filter_map(|s| self.equipment.get(*s))
                .nth(index - self.items.len())
        }
    }

    pub fn listed_len(&self) -> usize {
        self.items.len()
            + EquipSlot::all()
                .iter()
                .filter(|s| !self.equipment.is_empty(**s))
                .count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
