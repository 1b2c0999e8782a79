//! Audit log entry - immutable record of a privileged change

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::User;
use crate::value_objects::AuditLogId;

/// Actor id recorded for entries produced by the system itself
pub const SYSTEM_ACTOR_ID: &str = "system";
/// Actor name recorded for entries produced by the system itself
pub const SYSTEM_ACTOR_NAME: &str = "System";

/// Action tags emitted by the dashboard
///
/// The stored tag is free-form; this enum only covers what this service writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    UserRegistered,
    UserStatusChanged,
    UserRoleChanged,
    UserDeleted,
}

impl AuditAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserRegistered => "user_registered",
            Self::UserStatusChanged => "user_status_changed",
            Self::UserRoleChanged => "user_role_changed",
            Self::UserDeleted => "user_deleted",
        }
    }
}

/// Append-only audit log entry
#[derive(Debug, Clone, PartialEq)]
pub struct AuditLogEntry {
    pub id: AuditLogId,
    pub actor_id: String,
    pub actor_name: String,
    pub action: String,
    pub target_id: Option<String>,
    pub target_type: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub details: Option<Value>,
}

impl AuditLogEntry {
    /// Entry performed by a logged-in user
    pub fn by_user(actor: &User, action: AuditAction) -> Self {
        Self::new(actor.id.to_string(), actor.name.clone(), action)
    }

    /// Entry performed by the system (e.g. self-registration)
    pub fn by_system(action: AuditAction) -> Self {
        Self::new(SYSTEM_ACTOR_ID.to_string(), SYSTEM_ACTOR_NAME.to_string(), action)
    }

    fn new(actor_id: String, actor_name: String, action: AuditAction) -> Self {
        Self {
            id: AuditLogId::new(),
            actor_id,
            actor_name,
            action: action.as_str().to_string(),
            target_id: None,
            target_type: None,
            timestamp: Utc::now(),
            details: None,
        }
    }

    /// Attach a target user
    pub fn targeting_user(mut self, target: &User) -> Self {
        self.target_id = Some(target.id.to_string());
        self.target_type = Some("user".to_string());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}
