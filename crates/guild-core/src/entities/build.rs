//! Build entity - a published equipment and ability loadout

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::item::{ItemCategory, ItemRef, Spell};
use crate::value_objects::{BuildId, UserId};

/// Maximum title length in characters
pub const MAX_BUILD_TITLE_LEN: usize = 100;

/// Content category a build targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildCategory {
    PvE,
    PvP,
    ZvZ,
    GvG,
    Ganking,
    Avaloniano,
    Escape,
}

impl BuildCategory {
    pub const ALL: [BuildCategory; 7] = [
        BuildCategory::PvE,
        BuildCategory::PvP,
        BuildCategory::ZvZ,
        BuildCategory::GvG,
        BuildCategory::Ganking,
        BuildCategory::Avaloniano,
        BuildCategory::Escape,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PvE => "PvE",
            Self::PvP => "PvP",
            Self::ZvZ => "ZvZ",
            Self::GvG => "GvG",
            Self::Ganking => "Ganking",
            Self::Avaloniano => "Avaloniano",
            Self::Escape => "Escape",
        }
    }
}

impl fmt::Display for BuildCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown build category: {s}"))
    }
}

/// The six gear slots of a build
///
/// Every slot is always present; an unfilled slot is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<ItemRef>,
    pub offhand: Option<ItemRef>,
    pub helmet: Option<ItemRef>,
    pub chest: Option<ItemRef>,
    pub boots: Option<ItemRef>,
    pub cape: Option<ItemRef>,
}

impl Equipment {
    /// Slot names in display order, each matching the item category it accepts
    pub const SLOTS: [ItemCategory; 6] = [
        ItemCategory::Weapon,
        ItemCategory::Offhand,
        ItemCategory::Helmet,
        ItemCategory::Chest,
        ItemCategory::Boots,
        ItemCategory::Cape,
    ];

    pub fn slot(&self, slot: ItemCategory) -> Option<&ItemRef> {
        match slot {
            ItemCategory::Weapon => self.weapon.as_ref(),
            ItemCategory::Offhand => self.offhand.as_ref(),
            ItemCategory::Helmet => self.helmet.as_ref(),
            ItemCategory::Chest => self.chest.as_ref(),
            ItemCategory::Boots => self.boots.as_ref(),
            ItemCategory::Cape => self.cape.as_ref(),
            ItemCategory::Potion | ItemCategory::Food => None,
        }
    }

    /// Mutable access to a gear slot; `None` for consumable categories
    pub fn slot_mut(&mut self, slot: ItemCategory) -> Option<&mut Option<ItemRef>> {
        match slot {
            ItemCategory::Weapon => Some(&mut self.weapon),
            ItemCategory::Offhand => Some(&mut self.offhand),
            ItemCategory::Helmet => Some(&mut self.helmet),
            ItemCategory::Chest => Some(&mut self.chest),
            ItemCategory::Boots => Some(&mut self.boots),
            ItemCategory::Cape => Some(&mut self.cape),
            ItemCategory::Potion | ItemCategory::Food => None,
        }
    }
}

/// Consumables carried with a build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumables {
    pub potion: Option<ItemRef>,
    pub food: Option<ItemRef>,
}

impl Consumables {
    pub const SLOTS: [ItemCategory; 2] = [ItemCategory::Potion, ItemCategory::Food];

    pub fn slot(&self, slot: ItemCategory) -> Option<&ItemRef> {
        match slot {
            ItemCategory::Potion => self.potion.as_ref(),
            ItemCategory::Food => self.food.as_ref(),
            _ => None,
        }
    }

    pub fn slot_mut(&mut self, slot: ItemCategory) -> Option<&mut Option<ItemRef>> {
        match slot {
            ItemCategory::Potion => Some(&mut self.potion),
            ItemCategory::Food => Some(&mut self.food),
            _ => None,
        }
    }
}

/// Chosen spell per ability slot key (free-form keys such as `weapon_q`)
pub type Abilities = BTreeMap<String, Option<Spell>>;

/// Build entity
#[derive(Debug, Clone, PartialEq)]
pub struct Build {
    pub id: BuildId,
    pub title: String,
    pub category: BuildCategory,
    pub description: String,
    pub author_id: UserId,
    pub equipment: Equipment,
    pub consumables: Consumables,
    pub abilities: Abilities,
    pub ai_guide: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Build {
    pub fn new(title: String, category: BuildCategory, description: String, author_id: UserId) -> Self {
        Self {
            id: BuildId::new(),
            title,
            category,
            description,
            author_id,
            equipment: Equipment::default(),
            consumables: Consumables::default(),
            abilities: Abilities::new(),
            ai_guide: None,
            created_at: Utc::now(),
        }
    }

    /// Display name of the item in a gear or consumable slot, if any
    pub fn item_name(&self, slot: ItemCategory) -> Option<&str> {
        self.equipment
            .slot(slot)
            .or_else(|| self.consumables.slot(slot))
            .map(|item| item.name.as_str())
    }
}
