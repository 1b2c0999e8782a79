//! PostgreSQL implementation of ActivityRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use guild_core::entities::MemberActivityLog;
use guild_core::traits::{ActivityRepository, RepoResult};

use crate::models::MemberActivityModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ActivityRepository
#[derive(Clone)]
pub struct PgActivityRepository {
    pool: PgPool,
}

impl PgActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for PgActivityRepository {
    #[instrument(skip(self, event), fields(member = %event.member_name))]
    async fn append(&self, event: &MemberActivityLog) -> RepoResult<()> {
        sqlx::query("INSERT INTO member_activity (id, member_name, created_at) VALUES ($1, $2, $3)")
            .bind(event.id.into_uuid())
            .bind(&event.member_name)
            .bind(event.timestamp)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_recent(&self, limit: i64) -> RepoResult<Vec<MemberActivityLog>> {
        let rows = sqlx::query_as::<_, MemberActivityModel>(
            r"
            SELECT id, member_name, created_at
            FROM member_activity
            ORDER BY created_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(MemberActivityLog::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<MemberActivityLog>> {
        let rows = sqlx::query_as::<_, MemberActivityModel>(
            "SELECT id, member_name, created_at FROM member_activity ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(MemberActivityLog::from).collect())
    }
}
