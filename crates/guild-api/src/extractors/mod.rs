//! Axum extractors for request handling
//!
//! Custom extractors for session resolution and validated input.

mod session;
mod validated;

pub use session::{clear_session_cookie, session_cookie, SessionCookie, SessionUser};
pub use validated::{ValidatedJson, ValidatedQuery};
