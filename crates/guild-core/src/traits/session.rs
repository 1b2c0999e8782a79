//! Session store port

use async_trait::async_trait;

use super::repositories::RepoResult;
use crate::value_objects::{SessionId, UserId};

/// Maps opaque session ids to user ids
///
/// Implementations must guarantee that a removed id never resolves again.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, id: &SessionId) -> RepoResult<Option<UserId>>;

    async fn insert(&self, id: &SessionId, user_id: UserId) -> RepoResult<()>;

    /// Idempotent: removing an unknown id is not an error
    async fn remove(&self, id: &SessionId) -> RepoResult<()>;

    /// Drop every session bound to a user
    async fn remove_user(&self, user_id: UserId) -> RepoResult<()>;

    async fn health_check(&self) -> RepoResult<()> {
        Ok(())
    }
}
