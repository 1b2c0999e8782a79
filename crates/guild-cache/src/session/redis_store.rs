//! Session storage in Redis.
//!
//! Keys are namespaced by a boot id generated once per process, so a restart
//! invalidates every session exactly like the in-process store does.

use async_trait::async_trait;
use tracing::{debug, info};

use guild_core::traits::{RepoResult, SessionStore};
use guild_core::value_objects::{SessionId, UserId};

use crate::pool::RedisPool;

/// Key prefix for sessions
const SESSION_PREFIX: &str = "session:";

/// Key prefix for the per-user set of session ids
const USER_SESSIONS_PREFIX: &str = "user_sessions:";

/// Session store shared between server instances of the same boot
#[derive(Clone)]
pub struct RedisSessionStore {
    pool: RedisPool,
    boot_id: String,
    ttl_seconds: Option<u64>,
}

impl RedisSessionStore {
    /// Create a store with a fresh boot namespace
    #[must_use]
    pub fn new(pool: RedisPool, ttl_seconds: Option<u64>) -> Self {
        let boot_id = uuid::Uuid::new_v4().simple().to_string();
        info!(boot_id = %boot_id, ttl_seconds = ?ttl_seconds, "Redis session store ready");
        Self::with_boot_id(pool, boot_id, ttl_seconds)
    }

    /// Create a store in an explicit namespace
    #[must_use]
    pub fn with_boot_id(pool: RedisPool, boot_id: impl Into<String>, ttl_seconds: Option<u64>) -> Self {
        Self {
            pool,
            boot_id: boot_id.into(),
            ttl_seconds,
        }
    }

    fn key(&self, id: &SessionId) -> String {
        format!("{SESSION_PREFIX}{}:{}", self.boot_id, id.as_str())
    }

    fn user_key(&self, user_id: UserId) -> String {
        format!("{USER_SESSIONS_PREFIX}{}:{user_id}", self.boot_id)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, id: &SessionId) -> RepoResult<Option<UserId>> {
        Ok(self.pool.get_value(&self.key(id)).await?)
    }

    async fn insert(&self, id: &SessionId, user_id: UserId) -> RepoResult<()> {
        self.pool.set(&self.key(id), &user_id, self.ttl_seconds).await?;

        // Track the id in the user's set so remove_user can find it
        let user_key = self.user_key(user_id);
        self.pool.add_to_set(&user_key, id.as_str()).await?;
        if let Some(ttl) = self.ttl_seconds {
            self.pool.expire(&user_key, ttl).await?;
        }

        debug!(user_id = %user_id, "Stored session");
        Ok(())
    }

    async fn remove(&self, id: &SessionId) -> RepoResult<()> {
        let key = self.key(id);
        if let Some(user_id) = self.pool.get_value::<UserId>(&key).await? {
            self.pool
                .remove_from_set(&self.user_key(user_id), id.as_str())
                .await?;
        }
        self.pool.delete(&key).await?;
        Ok(())
    }

    async fn remove_user(&self, user_id: UserId) -> RepoResult<()> {
        let user_key = self.user_key(user_id);
        let session_ids = self.pool.set_members(&user_key).await?;

        let mut keys: Vec<String> = session_ids
            .iter()
            .map(|sid| format!("{SESSION_PREFIX}{}:{sid}", self.boot_id))
            .collect();
        keys.push(user_key);
        self.pool.delete_many(&keys).await?;

        info!(
            user_id = %user_id,
            count = session_ids.len(),
            "Removed all sessions for user"
        );
        Ok(())
    }

    async fn health_check(&self) -> RepoResult<()> {
        Ok(self.pool.health_check().await?)
    }
}
