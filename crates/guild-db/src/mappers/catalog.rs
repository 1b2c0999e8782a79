//! Item and spell <-> model mappers

use guild_core::entities::{Item, Spell};
use guild_core::DomainError;

use super::corrupt_column;
use crate::models::{ItemModel, SpellModel};

impl TryFrom<ItemModel> for Item {
    type Error = DomainError;

    fn try_from(model: ItemModel) -> Result<Self, Self::Error> {
        Ok(Item {
            id: model.id,
            name: model.name,
            category: model
                .category
                .parse()
                .map_err(|e| corrupt_column("items.category", e))?,
            icon_url: model.icon_url,
            spell_slots: model.spell_slots,
        })
    }
}

impl From<SpellModel> for Spell {
    fn from(model: SpellModel) -> Self {
        Spell {
            id: model.id,
            name: model.name,
            icon_url: model.icon_url,
        }
    }
}
