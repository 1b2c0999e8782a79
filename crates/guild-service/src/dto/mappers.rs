//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use guild_core::{AuditLogEntry, AuthoredBuild, Item, MemberActivityLog, User};

use super::responses::{
    ActivityEventResponse, AuditLogResponse, BuildResponse, CurrentUserResponse, ItemResponse,
    UserResponse, UNKNOWN_AUTHOR,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            avatar_url: user.avatar_url.clone(),
            role: user.role,
            status: user.status,
            created_at: user.created_at,
            last_seen_at: user.last_seen_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            user: UserResponse::from(user),
            capabilities: user.capabilities(),
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Audit Log Mappers
// ============================================================================

impl From<AuditLogEntry> for AuditLogResponse {
    fn from(entry: AuditLogEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            actor_id: entry.actor_id,
            actor_name: entry.actor_name,
            action: entry.action,
            target_id: entry.target_id,
            target_type: entry.target_type,
            timestamp: entry.timestamp,
            details: entry.details,
        }
    }
}

// ============================================================================
// Catalog Mappers
// ============================================================================

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            item_type: item.category,
            icon_url: item.icon_url,
        }
    }
}

// ============================================================================
// Build Mappers
// ============================================================================

impl From<AuthoredBuild> for BuildResponse {
    fn from(authored: AuthoredBuild) -> Self {
        let build = authored.build;
        Self {
            id: build.id.to_string(),
            title: build.title,
            category: build.category,
            description: build.description,
            author: authored
                .author_name
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            author_id: build.author_id.to_string(),
            equipment: build.equipment,
            consumables: build.consumables,
            abilities: build.abilities,
            ai_guide: build.ai_guide,
            created_at: build.created_at,
        }
    }
}

// ============================================================================
// Activity Mappers
// ============================================================================

impl From<MemberActivityLog> for ActivityEventResponse {
    fn from(event: MemberActivityLog) -> Self {
        Self {
            member_id: event.member_name,
            timestamp: event.timestamp,
        }
    }
}
