//! Build database model

use chrono::{DateTime, Utc};
use guild_core::entities::{Abilities, Consumables, Equipment};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Row of builds joined with the author's name
#[derive(Debug, Clone, FromRow)]
pub struct BuildModel {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub description: String,
    pub author_id: Uuid,
    /// NULL when the author no longer exists
    pub author_name: Option<String>,
    pub equipment: Json<Equipment>,
    pub consumables: Json<Consumables>,
    pub abilities: Json<Abilities>,
    pub ai_guide: Option<String>,
    pub created_at: DateTime<Utc>,
}
