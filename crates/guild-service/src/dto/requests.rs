//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

use guild_core::{GuildRole, UserStatus};

const USERNAME_MIN_CHARS: usize = 2;
const USERNAME_MAX_CHARS: usize = 32;

fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len = username.trim().chars().count();
    if (USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&len) {
        return Ok(());
    }
    let message = if len == 0 {
        "Username is required."
    } else {
        "Username must be 2-32 characters."
    };
    Err(ValidationError::new("username_length").with_message(Cow::Borrowed(message)))
}

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_username"))]
    pub username: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Admin update of another account
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub status: Option<UserStatus>,
    pub role: Option<GuildRole>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.role.is_none()
    }
}

/// Query for the audit log endpoint
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AuditLogQuery {
    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    pub limit: Option<i64>,
}

// ============================================================================
// Catalog Requests
// ============================================================================

/// Item lookup filters
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ItemQuery {
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub search: Option<String>,
}

// ============================================================================
// Build Requests
// ============================================================================

/// A catalog selection, either the bare id or an object carrying it
///
/// The dashboard posts whole item objects; scripts tend to post ids.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ItemSelection {
    Id(String),
    Object { id: String },
}

impl ItemSelection {
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) | Self::Object { id } => id,
        }
    }
}

/// Create build request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBuildRequest {
    #[serde(default)]
    pub title: String,

    pub category: Option<String>,

    #[serde(default)]
    #[validate(length(max = 4000, message = "Description must be at most 4000 characters."))]
    pub description: String,

    /// Slot name -> selection
    #[serde(default)]
    pub equipment: HashMap<String, Option<ItemSelection>>,

    #[serde(default)]
    pub consumables: HashMap<String, Option<ItemSelection>>,

    /// Ability key -> spell selection
    #[serde(default)]
    pub abilities: BTreeMap<String, Option<ItemSelection>>,
}

// ============================================================================
// Guide Requests
// ============================================================================

/// Anything with a display name, as posted inside a build
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedEntry {
    pub name: Option<String>,
}

/// Explicit `null` reads as the field's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The build a guide is requested for
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GuideBuildPayload {
    pub id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub equipment: HashMap<String, Option<NamedEntry>>,
    #[serde(deserialize_with = "null_as_default")]
    pub consumables: HashMap<String, Option<NamedEntry>>,
}

impl GuideBuildPayload {
    /// Display name in a slot, if one was posted
    pub fn slot_name(&self, slot: &str) -> Option<&str> {
        self.equipment
            .get(slot)
            .or_else(|| self.consumables.get(slot))
            .and_then(Option::as_ref)
            .and_then(|entry| entry.name.as_deref())
            .filter(|name| !name.trim().is_empty())
    }
}

/// Guide generation request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GenerateGuideRequest {
    pub build: Option<GuideBuildPayload>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_username_bounds() {
        let ok = RegisterRequest {
            username: "  Al  ".to_string(),
        };
        assert!(ok.validate().is_ok());

        let short = RegisterRequest {
            username: " A ".to_string(),
        };
        assert!(short.validate().is_err());

        let long = RegisterRequest {
            username: "x".repeat(33),
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_login_requires_username() {
        let req: LoginRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_user_accepts_spanish_roles() {
        let req: UpdateUserRequest =
            serde_json::from_value(json!({ "role": "Oficial", "status": "active" })).unwrap();
        assert_eq!(req.role, Some(GuildRole::Officer));
        assert_eq!(req.status, Some(UserStatus::Active));
        assert!(!req.is_empty());
        assert!(UpdateUserRequest::default().is_empty());
    }

    #[test]
    fn test_item_selection_forms() {
        let req: CreateBuildRequest = serde_json::from_value(json!({
            "title": "Brawler",
            "category": "PvP",
            "equipment": {
                "weapon": "T4_MAIN_AXE",
                "offhand": null,
                "chest": { "id": "T4_ARMOR_PLATE_SET1", "name": "Armadura", "type": "chest" }
            }
        }))
        .unwrap();
        assert_eq!(req.equipment["weapon"].as_ref().unwrap().id(), "T4_MAIN_AXE");
        assert!(req.equipment["offhand"].is_none());
        assert_eq!(
            req.equipment["chest"].as_ref().unwrap().id(),
            "T4_ARMOR_PLATE_SET1"
        );
    }

    #[test]
    fn test_guide_payload_slot_names() {
        let req: GenerateGuideRequest = serde_json::from_value(json!({
            "build": {
                "title": "Brawler",
                "equipment": { "weapon": { "name": "Hacha" }, "cape": null },
                "consumables": { "food": { "name": "" } }
            }
        }))
        .unwrap();
        let build = req.build.unwrap();
        assert_eq!(build.slot_name("weapon"), Some("Hacha"));
        assert_eq!(build.slot_name("cape"), None);
        assert_eq!(build.slot_name("food"), None);
        assert_eq!(build.slot_name("helmet"), None);
    }

    #[test]
    fn test_guide_payload_accepts_null_fields() {
        let req: GenerateGuideRequest = serde_json::from_value(json!({
            "build": {
                "id": null,
                "title": null,
                "category": "PvP",
                "description": null,
                "equipment": { "weapon": { "name": "Hacha" } },
                "consumables": null
            }
        }))
        .unwrap();
        let build = req.build.unwrap();
        assert!(build.id.is_none());
        assert_eq!(build.title, "");
        assert_eq!(build.category, "PvP");
        assert_eq!(build.description, "");
        assert!(build.consumables.is_empty());
        assert_eq!(build.slot_name("weapon"), Some("Hacha"));
    }

    #[test]
    fn test_audit_query_range() {
        assert!(AuditLogQuery { limit: Some(0) }.validate().is_err());
        assert!(AuditLogQuery { limit: Some(1000) }.validate().is_ok());
        assert!(AuditLogQuery::default().validate().is_ok());
    }
}
