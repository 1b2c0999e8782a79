//! Domain entities - core business objects

mod activity;
mod audit_log;
mod build;
mod item;
mod user;

pub use activity::MemberActivityLog;
pub use audit_log::{AuditAction, AuditLogEntry, SYSTEM_ACTOR_ID, SYSTEM_ACTOR_NAME};
pub use build::{Abilities, Build, BuildCategory, Consumables, Equipment, MAX_BUILD_TITLE_LEN};
pub use item::{Item, ItemCategory, ItemRef, Spell};
pub use user::{User, PRESENCE_TOUCH_INTERVAL_SECS};
