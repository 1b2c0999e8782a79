//! Test fixtures and data generators
//!
//! Provides reusable request bodies and response shapes for integration tests.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration and login body
#[derive(Debug, Clone, Serialize)]
pub struct UsernameRequest {
    pub username: String,
}

impl UsernameRequest {
    pub fn unique() -> Self {
        Self {
            username: format!("Raider{}", unique_suffix()),
        }
    }

    pub fn named(username: &str) -> Self {
        Self {
            username: username.to_string(),
        }
    }
}

/// User as returned by the API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub role: String,
    pub status: String,
    pub last_seen_at: Option<String>,
}

/// Session user with capability names
#[derive(Debug, Deserialize)]
pub struct CurrentUserResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub capabilities: Vec<String>,
}

/// Audit entry as returned by the API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogResponse {
    pub actor_name: String,
    pub action: String,
    pub target_id: Option<String>,
    pub details: Option<Value>,
}

/// Catalog item as returned by the API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
}

/// Build as returned by the API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResponse {
    pub id: String,
    pub title: String,
    pub category: String,
    pub author: String,
    pub equipment: Value,
    pub abilities: Value,
    pub ai_guide: Option<String>,
}

/// Guild member as returned by the API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: String,
    pub name: String,
    pub online: bool,
}

/// Generated guide
#[derive(Debug, Deserialize)]
pub struct GuideResponse {
    pub guide: String,
    pub cached: bool,
}

/// Error body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Build body referencing the seeded catalog
pub fn axe_build(title: &str) -> Value {
    json!({
        "title": title,
        "category": "PvP",
        "description": "Bleed them out",
        "equipment": {
            "weapon": { "id": "T4_MAIN_AXE", "name": "Hacha de Batalla de Adepto" },
            "helmet": "T4_HEAD_PLATE_SET1",
            "cape": null
        },
        "consumables": { "food": "T7_MEAL_STEW" },
        "abilities": { "Q": "AXE_CLEAVE", "Passive": "PASSIVE_BLOODTHIRST" }
    })
}

/// Guide request body for a build, stored or not
pub fn guide_request(build_id: Option<&str>) -> Value {
    json!({
        "build": {
            "id": build_id,
            "title": "Axe brawler",
            "category": "PvP",
            "description": "Bleed them out",
            "equipment": { "weapon": { "name": "Hacha de Batalla de Adepto" } },
            "consumables": { "food": { "name": "Estofado de Ternera de Anciano" } }
        }
    })
}
