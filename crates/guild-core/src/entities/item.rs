//! Catalog reference data: items and spells

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Base URL of the game's item sprite renderer
const ITEM_ICON_BASE: &str = "https://render.albiononline.com/v1/sprite";
/// Base URL of the game's spell sprite renderer
const SPELL_ICON_BASE: &str = "https://render.albiononline.com/v1/spell";

/// Item category; doubles as the build slot an item can occupy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Weapon,
    Offhand,
    Helmet,
    Chest,
    Boots,
    Cape,
    Potion,
    Food,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 8] = [
        ItemCategory::Weapon,
        ItemCategory::Offhand,
        ItemCategory::Helmet,
        ItemCategory::Chest,
        ItemCategory::Boots,
        ItemCategory::Cape,
        ItemCategory::Potion,
        ItemCategory::Food,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weapon => "weapon",
            Self::Offhand => "offhand",
            Self::Helmet => "helmet",
            Self::Chest => "chest",
            Self::Boots => "boots",
            Self::Cape => "cape",
            Self::Potion => "potion",
            Self::Food => "food",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown item type: {s}"))
    }
}

/// Catalog item
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Game-unique name, e.g. `T4_MAIN_AXE`
    pub id: String,
    pub name: String,
    pub category: ItemCategory,
    pub icon_url: String,
    /// Raw spell-slot data as delivered by upstream game data
    pub spell_slots: Option<Value>,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: ItemCategory) -> Self {
        let id = id.into();
        Self {
            icon_url: Self::default_icon_url(&id),
            id,
            name: name.into(),
            category,
            spell_slots: None,
        }
    }

    pub fn with_spell_slots(mut self, spell_slots: Value) -> Self {
        self.spell_slots = Some(spell_slots);
        self
    }

    /// Sprite URL the game CDN serves for an item id
    pub fn default_icon_url(id: &str) -> String {
        format!("{ITEM_ICON_BASE}/{id}?quality=4&size=128")
    }

    /// Case-insensitive substring match on the display name
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Lightweight copy stored inside builds
    pub fn to_ref(&self) -> ItemRef {
        ItemRef {
            id: self.id.clone(),
            name: self.name.clone(),
            category: self.category,
            icon_url: self.icon_url.clone(),
        }
    }
}

/// Item snapshot embedded in a build document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRef {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category: ItemCategory,
    pub icon_url: String,
}

/// Spell (ability) reference data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spell {
    pub id: String,
    pub name: String,
    pub icon_url: String,
}

impl Spell {
    /// Spell whose display name is its unique name, with the CDN icon for `sprite`
    pub fn from_upstream(unique_name: impl Into<String>, sprite: &str) -> Self {
        let id = unique_name.into();
        Self {
            name: id.clone(),
            id,
            icon_url: format!("{SPELL_ICON_BASE}/{sprite}"),
        }
    }
}
