//! Capability flags and the role -> capability table
//!
//! Every authorization decision in the dashboard goes through [`authorize`].

use bitflags::bitflags;
use serde::{Serialize, Serializer};

use super::role::GuildRole;
use crate::entities::User;
use crate::error::DomainError;

bitflags! {
    /// Actions a role may be allowed to perform
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        /// Read-only admin pages: user list and audit log
        const VIEW_ADMIN   = 1 << 0;
        /// Change status/role of users and delete them
        const MANAGE_USERS = 1 << 1;
        /// Publish a build
        const CREATE_BUILD = 1 << 2;

        /// Baseline granted to every role
        const BASELINE = Self::CREATE_BUILD.bits();

        /// Full administrative rights
        const ADMIN = Self::VIEW_ADMIN.bits()
            | Self::MANAGE_USERS.bits()
            | Self::CREATE_BUILD.bits();
    }
}

impl Capabilities {
    /// Capability set granted to a role
    pub const fn for_role(role: GuildRole) -> Self {
        match role {
            GuildRole::GuildMaster | GuildRole::RightHand => Self::ADMIN,
            GuildRole::Officer => Self::VIEW_ADMIN.union(Self::BASELINE),
            GuildRole::Member | GuildRole::Initiate | GuildRole::Guest => Self::BASELINE,
        }
    }

    /// Names of the individual flags that are set
    pub fn list(&self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}

impl Serialize for Capabilities {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.list().serialize(serializer)
    }
}

/// Decide whether `user` may perform an action requiring `required`
///
/// Only active accounts hold capabilities.
pub fn authorize(user: &User, required: Capabilities) -> Result<(), DomainError> {
    if user.capabilities().contains(required) {
        Ok(())
    } else {
        Err(DomainError::MissingCapability(required.list().join("|")))
    }
}
