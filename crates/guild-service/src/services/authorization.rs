//! Authorization service
//!
//! Single entry point for capability checks on a resolved user.

use guild_core::{authorize, Capabilities, User};
use tracing::warn;

use super::error::ServiceResult;

/// Capability guard for signed-in users
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationService;

impl AuthorizationService {
    pub fn new() -> Self {
        Self
    }

    /// Check capability without failing
    pub fn can(&self, user: &User, capability: Capabilities) -> bool {
        user.capabilities().contains(capability)
    }

    /// Check capability and return error if missing
    pub fn require(&self, user: &User, capability: Capabilities) -> ServiceResult<()> {
        authorize(user, capability).map_err(|e| {
            warn!(
                user_id = %user.id,
                role = %user.role,
                required = ?capability.list(),
                "Access denied"
            );
            e.into()
        })
    }
}
