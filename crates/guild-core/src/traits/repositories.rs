//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (PostgreSQL or in-memory).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{AuditLogEntry, Build, Item, ItemCategory, MemberActivityLog, Spell, User};
use crate::error::DomainError;
use crate::value_objects::{BuildId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by name, ignoring case
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<User>>;

    /// All users, most recently created first
    async fn list(&self) -> RepoResult<Vec<User>>;

    /// Users with status `active`
    async fn list_active(&self) -> RepoResult<Vec<User>>;

    /// Create a new user; a name clash (ignoring case) fails with `UsernameTaken`
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Persist role and status of an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Record that the user was seen at `at`
    async fn touch_last_seen(&self, id: UserId, at: DateTime<Utc>) -> RepoResult<()>;

    /// Hard delete; returns whether a row was removed
    async fn delete(&self, id: UserId) -> RepoResult<bool>;
}

// ============================================================================
// Audit Log Repository
// ============================================================================

/// Append-only: there is deliberately no update or delete.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn append(&self, entry: &AuditLogEntry) -> RepoResult<()>;

    /// Entries newest first, optionally capped
    async fn list_recent(&self, limit: Option<i64>) -> RepoResult<Vec<AuditLogEntry>>;
}

// ============================================================================
// Catalog Repositories
// ============================================================================

#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Item>>;

    /// Items with the given ids; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Item>>;

    /// Items of a category whose name contains `search` (ignoring case), ordered by name
    async fn search(&self, category: ItemCategory, search: Option<&str>) -> RepoResult<Vec<Item>>;

    /// Insert or replace by id
    async fn upsert(&self, item: &Item) -> RepoResult<()>;
}

#[async_trait]
pub trait SpellRepository: Send + Sync {
    /// Batch fetch; unknown ids are skipped, order is unspecified
    async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Spell>>;

    /// Insert or replace by id
    async fn upsert(&self, spell: &Spell) -> RepoResult<()>;
}

// ============================================================================
// Build Repository
// ============================================================================

/// A build together with its author's current display name
///
/// `author_name` is `None` once the author account has been deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthoredBuild {
    pub build: Build,
    pub author_name: Option<String>,
}

#[async_trait]
pub trait BuildRepository: Send + Sync {
    /// All builds, newest first
    async fn list(&self) -> RepoResult<Vec<AuthoredBuild>>;

    async fn find_by_id(&self, id: BuildId) -> RepoResult<Option<AuthoredBuild>>;

    async fn create(&self, build: &Build) -> RepoResult<()>;

    /// Cache a generated guide on the build
    async fn set_ai_guide(&self, id: BuildId, guide: &str) -> RepoResult<()>;
}

// ============================================================================
// Activity Repository
// ============================================================================

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn append(&self, event: &MemberActivityLog) -> RepoResult<()>;

    /// Most recent events first, capped at `limit`
    async fn list_recent(&self, limit: i64) -> RepoResult<Vec<MemberActivityLog>>;

    /// Every recorded event
    async fn list_all(&self) -> RepoResult<Vec<MemberActivityLog>>;
}
