//! User entity - a dashboard account belonging to a guild player

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::{Capabilities, GuildRole, UserId, UserStatus};

/// Minimum interval between two presence touches for the same user
pub const PRESENCE_TOUCH_INTERVAL_SECS: i64 = 60;

/// Dashboard user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub avatar_url: Option<String>,
    pub role: GuildRole,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl User {
    /// A freshly registered account: Guest, awaiting approval
    pub fn register(name: String) -> Self {
        Self {
            id: UserId::new(),
            name,
            avatar_url: None,
            role: GuildRole::Guest,
            status: UserStatus::Pending,
            created_at: Utc::now(),
            last_seen_at: None,
        }
    }

    /// An already-approved account with the given role
    pub fn active(name: String, role: GuildRole) -> Self {
        Self {
            role,
            status: UserStatus::Active,
            ..Self::register(name)
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Capabilities held by this account
    ///
    /// Pending and rejected accounts hold none regardless of role.
    pub fn capabilities(&self) -> Capabilities {
        if self.is_active() {
            Capabilities::for_role(self.role)
        } else {
            Capabilities::empty()
        }
    }

    /// Case-insensitive name comparison used for lookups and uniqueness
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Whether the user was seen within `window` of `now`
    pub fn is_online(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.last_seen_at
            .is_some_and(|seen| seen <= now && now - seen <= window)
    }

    /// Whether a presence touch at `now` should be written
    pub fn needs_presence_touch(&self, now: DateTime<Utc>) -> bool {
        match self.last_seen_at {
            Some(seen) => now - seen >= Duration::seconds(PRESENCE_TOUCH_INTERVAL_SECS),
            None => true,
        }
    }
}
