//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in guild-core.
//! Each repository handles database operations for a specific domain entity.

mod activity;
mod audit_log;
mod build;
mod catalog;
mod error;
mod user;

pub use activity::PgActivityRepository;
pub use audit_log::PgAuditLogRepository;
pub use build::PgBuildRepository;
pub use catalog::{PgItemRepository, PgSpellRepository};
pub use user::PgUserRepository;
