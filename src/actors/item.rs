//! Items: actors that can be picked up and used

use serde::{Deserialize, Serialize};

use super::actor::{ActorData, ActorId, Position};
use crate::items::Pickable;

/// Item class tag, used for value lookup and pickup dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon,
    Armor,
    Potion,
    Scroll,
    Gold,
    Food,
    Amulet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ActorId,
    pub pos: Position,
    pub data: ActorData,
    /// The use-effect strategy; exactly one, owned by this item
    pub pickable: Pickable,
    pub kind: ItemKind,
    pub base_value: i32,
    /// Mutable enhancement level layered over the immutable template
    pub enhancement: u8,
    /// Held in an equipment slot (cleared whenever the item moves back to
    /// inventory or the floor)
    pub equipped: bool,
}

impl Item {
    pub fn new(
        id: ActorId,
        pos: Position,
        data: ActorData,
        kind: ItemKind,
        pickable: Pickable,
        base_value: i32,
    ) -> Self {
        Self {
            id,
            pos,
            data,
            pickable,
            kind,
            base_value,
            enhancement: 0,
            equipped: false,
        }
    }

    /// Display name, "+N name" when enhanced
    pub fn name(&self) -> String {
        if self.enhancement > 0 {
            format!("+{} {}", self.enhancement, self.data.name)
        } else {
            self.data.name.clone()
        }
    }

    /// Monetary value scaled by enhancement level
    pub fn value(&self) -> i32 {
        self.base_value * (1 + self.enhancement as i32)
    }

    pub fn is_enhanced(&self) -> bool {
        self.enhancement > 0
    }

    pub fn enhance(&mut self, levels: u8) {
        self.enhancement = self.enhancement.saturating_add(levels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> Item {
        Item::new(
            9,
            Position::new(0, 0),
            ActorData::new('/', "long sword", (170, 170, 170)),
            ItemKind::Weapon,
            Pickable::Weapon {
                damage: crate::rng::DamageRoll::new(1, 8, "1d8"),
                hands: crate::data::HandRequirement::OneHanded,
                hit_bonus: 0,
                damage_bonus: 0,
                ranged: false,
            },
            15,
        )
    }

    #[test]
    fn enhancement_scales_value_monotonically() {
        let mut item = sword();
        let mut last = item.value();
        for _ in 0..3 {
            item.enhance(1);
            assert!(item.value() > last);
            last = item.value();
        }
        assert_eq!(item.value(), 15 * 4);
    }

    #[test]
    fn enhanced_name_carries_the_level() {
        let mut item = sword();
        assert_eq!(item.name(), "long sword");
        item.enhance(2);
        assert_eq!(item.name(), "+2 long sword");
    }
}
