//! Member activity database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct MemberActivityModel {
    pub id: Uuid,
    pub member_name: String,
    pub created_at: DateTime<Utc>,
}
