//! PostgreSQL implementation of BuildRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use guild_core::entities::Build;
use guild_core::error::DomainError;
use guild_core::traits::{AuthoredBuild, BuildRepository, RepoResult};
use guild_core::value_objects::BuildId;

use crate::models::BuildModel;

use super::error::map_db_error;

const BUILD_SELECT: &str = r"
    SELECT b.id, b.title, b.category, b.description, b.author_id, u.name AS author_name,
           b.equipment, b.consumables, b.abilities, b.ai_guide, b.created_at
    FROM builds b
    LEFT JOIN users u ON u.id = b.author_id
";

/// PostgreSQL implementation of BuildRepository
#[derive(Clone)]
pub struct PgBuildRepository {
    pool: PgPool,
}

impl PgBuildRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BuildRepository for PgBuildRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<AuthoredBuild>> {
        let sql = format!("{BUILD_SELECT} ORDER BY b.created_at DESC");
        let rows = sqlx::query_as::<_, BuildModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(AuthoredBuild::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: BuildId) -> RepoResult<Option<AuthoredBuild>> {
        let sql = format!("{BUILD_SELECT} WHERE b.id = $1");
        let result = sqlx::query_as::<_, BuildModel>(&sql)
            .bind(id.into_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(AuthoredBuild::try_from).transpose()
    }

    #[instrument(skip(self, build), fields(build_id = %build.id, author_id = %build.author_id))]
    async fn create(&self, build: &Build) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO builds (id, title, category, description, author_id,
                                equipment, consumables, abilities, ai_guide, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(build.id.into_uuid())
        .bind(&build.title)
        .bind(build.category.as_str())
        .bind(&build.description)
        .bind(build.author_id.into_uuid())
        .bind(Json(&build.equipment))
        .bind(Json(&build.consumables))
        .bind(Json(&build.abilities))
        .bind(&build.ai_guide)
        .bind(build.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, guide))]
    async fn set_ai_guide(&self, id: BuildId, guide: &str) -> RepoResult<()> {
        let result = sqlx::query("UPDATE builds SET ai_guide = $2 WHERE id = $1")
            .bind(id.into_uuid())
            .bind(guide)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::BuildNotFound(id));
        }
        Ok(())
    }
}
