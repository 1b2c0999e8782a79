//! Value objects - immutable types that represent domain concepts

mod capabilities;
mod ids;
mod role;
mod session_id;

pub use capabilities::{authorize, Capabilities};
pub use ids::{ActivityLogId, AuditLogId, BuildId, IdParseError, UserId};
pub use role::{GuildRole, UserStatus};
pub use session_id::SessionId;
