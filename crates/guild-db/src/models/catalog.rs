//! Catalog database models

use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// Database model for items table
#[derive(Debug, Clone, FromRow)]
pub struct ItemModel {
    pub id: String,
    pub name: String,
    pub category: String,
    pub icon_url: String,
    pub spell_slots: Option<JsonValue>,
}

/// Database model for spells table
#[derive(Debug, Clone, FromRow)]
pub struct SpellModel {
    pub id: String,
    pub name: String,
    pub icon_url: String,
}
