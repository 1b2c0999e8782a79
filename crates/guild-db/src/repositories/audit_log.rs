//! PostgreSQL implementation of AuditLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use guild_core::entities::AuditLogEntry;
use guild_core::traits::{AuditLogRepository, RepoResult};

use crate::models::AuditLogModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AuditLogRepository
#[derive(Clone)]
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    #[instrument(skip(self, entry), fields(action = %entry.action))]
    async fn append(&self, entry: &AuditLogEntry) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO audit_logs (id, actor_id, actor_name, action, target_id, target_type, details, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(entry.id.into_uuid())
        .bind(&entry.actor_id)
        .bind(&entry.actor_name)
        .bind(&entry.action)
        .bind(&entry.target_id)
        .bind(&entry.target_type)
        .bind(&entry.details)
        .bind(entry.timestamp)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_recent(&self, limit: Option<i64>) -> RepoResult<Vec<AuditLogEntry>> {
        // LIMIT NULL means no limit in PostgreSQL
        let rows = sqlx::query_as::<_, AuditLogModel>(
            r"
            SELECT id, actor_id, actor_name, action, target_id, target_type, details, created_at
            FROM audit_logs
            ORDER BY created_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(AuditLogEntry::from).collect())
    }
}
