//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output with camelCase
//! field names, the shape the dashboard frontend reads.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use guild_core::{
    Abilities, ActivityBucket, BuildCategory, Capabilities, Consumables, Equipment, GuildRole,
    ItemCategory, UserStatus,
};

// ============================================================================
// Common Response Types
// ============================================================================

/// Plain `{message}` acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Account as shown in the admin user list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub role: GuildRole,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen_at: Option<DateTime<Utc>>,
}

/// Signed-in account plus what it may do
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub capabilities: Capabilities,
}

// ============================================================================
// Audit Log Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogResponse {
    pub id: String,
    pub actor_id: String,
    pub actor_name: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

// ============================================================================
// Catalog Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemCategory,
    pub icon_url: String,
}

// ============================================================================
// Build Responses
// ============================================================================

/// Placeholder author name once the author account is gone
pub const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResponse {
    pub id: String,
    pub title: String,
    pub category: BuildCategory,
    pub description: String,
    pub author: String,
    pub author_id: String,
    pub equipment: Equipment,
    pub consumables: Consumables,
    pub abilities: Abilities,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_guide: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Guild Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: String,
    pub name: String,
    pub role: GuildRole,
    pub online: bool,
    pub last_seen: Option<DateTime<Utc>>,
}

/// One login event; `memberId` carries the member's display name
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEventResponse {
    pub member_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummaryResponse {
    pub daily: Vec<ActivityBucket>,
    pub hourly: Vec<ActivityBucket>,
    pub total_events: usize,
}

// ============================================================================
// Guide Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct GuideResponse {
    pub guide: String,
    /// Served from the build's stored guide without calling upstream
    pub cached: bool,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health of each backing store; `None` means the backend is not in use
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub sessions: String,
}

fn check_label(healthy: Option<bool>) -> String {
    match healthy {
        Some(true) => "healthy",
        Some(false) => "unhealthy",
        None => "in_memory",
    }
    .to_string()
}

impl ReadinessResponse {
    pub fn ready(database_healthy: Option<bool>, sessions_healthy: bool) -> Self {
        let all_healthy = database_healthy.unwrap_or(true) && sessions_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: check_label(database_healthy),
                sessions: check_label(Some(sessions_healthy)),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
