//! Database models - SQLx-compatible structs for PostgreSQL tables

mod activity;
mod audit_log;
mod build;
mod catalog;
mod user;

pub use activity::MemberActivityModel;
pub use audit_log::AuditLogModel;
pub use build::BuildModel;
pub use catalog::{ItemModel, SpellModel};
pub use user::UserModel;
