//! Ports implemented by the infrastructure crates

mod guide;
mod repositories;
mod session;

pub use guide::GuideGenerator;
pub use repositories::{
    ActivityRepository, AuditLogRepository, AuthoredBuild, BuildRepository, ItemRepository,
    RepoResult, SpellRepository, UserRepository,
};
pub use session::SessionStore;
