//! PostgreSQL implementations of the catalog repositories

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use guild_core::entities::{Item, ItemCategory, Spell};
use guild_core::traits::{ItemRepository, RepoResult, SpellRepository};

use crate::models::{ItemModel, SpellModel};

use super::error::map_db_error;

/// PostgreSQL implementation of ItemRepository
#[derive(Clone)]
pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Item>> {
        let result = sqlx::query_as::<_, ItemModel>(
            "SELECT id, name, category, icon_url, spell_slots FROM items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Item::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Item>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, ItemModel>(
            "SELECT id, name, category, icon_url, spell_slots FROM items WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Item::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn search(&self, category: ItemCategory, search: Option<&str>) -> RepoResult<Vec<Item>> {
        // STRPOS instead of LIKE so user input needs no wildcard escaping
        let rows = sqlx::query_as::<_, ItemModel>(
            r"
            SELECT id, name, category, icon_url, spell_slots
            FROM items
            WHERE category = $1
              AND ($2::TEXT IS NULL OR STRPOS(LOWER(name), LOWER($2)) > 0)
            ORDER BY name
            ",
        )
        .bind(category.as_str())
        .bind(search)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Item::try_from).collect()
    }

    #[instrument(skip(self, item), fields(item_id = %item.id))]
    async fn upsert(&self, item: &Item) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO items (id, name, category, icon_url, spell_slots)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                category = EXCLUDED.category,
                icon_url = EXCLUDED.icon_url,
                spell_slots = EXCLUDED.spell_slots
            ",
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.category.as_str())
        .bind(&item.icon_url)
        .bind(&item.spell_slots)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

/// PostgreSQL implementation of SpellRepository
#[derive(Clone)]
pub struct PgSpellRepository {
    pool: PgPool,
}

impl PgSpellRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SpellRepository for PgSpellRepository {
    #[instrument(skip(self), fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Spell>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, SpellModel>(
            "SELECT id, name, icon_url FROM spells WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Spell::from).collect())
    }

    #[instrument(skip(self, spell), fields(spell_id = %spell.id))]
    async fn upsert(&self, spell: &Spell) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO spells (id, name, icon_url)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name, icon_url = EXCLUDED.icon_url
            ",
        )
        .bind(&spell.id)
        .bind(&spell.name)
        .bind(&spell.icon_url)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
