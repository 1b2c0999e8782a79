//! In-process session store.
//!
//! Sessions live only as long as the process; a restart logs everyone out.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use guild_core::traits::{RepoResult, SessionStore};
use guild_core::value_objects::{SessionId, UserId};

#[derive(Debug, Clone, Copy)]
struct SessionEntry {
    user_id: UserId,
    expires_at: Option<DateTime<Utc>>,
}

impl SessionEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Session map backed by `DashMap`
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, SessionEntry>,
    ttl: Option<Duration>,
}

impl InMemorySessionStore {
    /// Sessions never expire on their own
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sessions expire `ttl_seconds` after creation
    #[must_use]
    pub fn with_ttl(ttl_seconds: Option<u64>) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl: ttl_seconds.map(|secs| Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX))),
        }
    }

    /// Number of live entries (expired ones included until touched)
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &SessionId) -> RepoResult<Option<UserId>> {
        let now = Utc::now();
        let entry = self.sessions.get(id.as_str()).map(|e| *e);
        match entry {
            Some(entry) if entry.is_expired(now) => {
                self.sessions.remove(id.as_str());
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.user_id)),
            None => Ok(None),
        }
    }

    async fn insert(&self, id: &SessionId, user_id: UserId) -> RepoResult<()> {
        let expires_at = self
            .ttl
            .and_then(|ttl| Utc::now().checked_add_signed(ttl));
        self.sessions.insert(
            id.as_str().to_string(),
            SessionEntry {
                user_id,
                expires_at,
            },
        );
        Ok(())
    }

    async fn remove(&self, id: &SessionId) -> RepoResult<()> {
        self.sessions.remove(id.as_str());
        Ok(())
    }

    async fn remove_user(&self, user_id: UserId) -> RepoResult<()> {
        self.sessions.retain(|_, entry| entry.user_id != user_id);
        Ok(())
    }
}
