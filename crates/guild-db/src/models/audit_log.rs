//! Audit log database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for audit_logs table
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogModel {
    pub id: Uuid,
    /// User id as text, or "system"
    pub actor_id: String,
    pub actor_name: String,
    pub action: String,
    pub target_id: Option<String>,
    pub target_type: Option<String>,
    /// JSON object such as `{"from": .., "to": ..}`
    pub details: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}
