//! # guild-core
//!
//! Domain layer containing entities, value objects, pure aggregations, and the
//! ports (repository, session store, guide generator) the outer layers implement.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod aggregation;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use aggregation::{
    daily_buckets, group_abilities, hourly_buckets, AbilityGroups, ActivityBucket, SpellSlot,
    SpellSlots,
};
pub use entities::{
    Abilities, AuditAction, AuditLogEntry, Build, BuildCategory, Consumables, Equipment, Item,
    ItemCategory, ItemRef, MemberActivityLog, Spell, User,
};
pub use error::DomainError;
pub use traits::{
    ActivityRepository, AuditLogRepository, AuthoredBuild, BuildRepository, GuideGenerator,
    ItemRepository, RepoResult, SessionStore, SpellRepository, UserRepository,
};
pub use value_objects::{
    authorize, ActivityLogId, AuditLogId, BuildId, Capabilities, GuildRole, IdParseError,
    SessionId, UserId, UserStatus,
};
