//! Catalog service
//!
//! Item lookup by slot and the Q/W/E/Passive grouping of an item's spells.

use guild_core::{group_abilities, AbilityGroups, ItemCategory, SpellSlots};
use tracing::{debug, instrument};

use crate::dto::{ItemQuery, ItemResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Catalog service
pub struct CatalogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CatalogService<'a> {
    /// Create a new CatalogService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Items of one category, optionally filtered by a name substring
    #[instrument(skip(self))]
    pub async fn find_items(&self, query: ItemQuery) -> ServiceResult<Vec<ItemResponse>> {
        let raw_type = query
            .item_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ServiceError::validation("Item type is required."))?;

        let category: ItemCategory = raw_type
            .parse()
            .map_err(|_| ServiceError::validation(format!("Unknown item type: {raw_type}")))?;

        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let items = self.ctx.item_repo().search(category, search).await?;
        Ok(items.into_iter().map(ItemResponse::from).collect())
    }

    /// Spells of an item grouped by ability key
    ///
    /// Unknown items and items without resolvable spells give an empty mapping.
    #[instrument(skip(self))]
    pub async fn item_abilities(&self, item_id: &str) -> ServiceResult<AbilityGroups> {
        let Some(item) = self.ctx.item_repo().find_by_id(item_id).await? else {
            debug!("Unknown item");
            return Ok(AbilityGroups::default());
        };

        let spell_ids = SpellSlots::parse(item.spell_slots.as_ref()).spell_ids();
        if spell_ids.is_empty() {
            return Ok(AbilityGroups::default());
        }

        let spells = self.ctx.spell_repo().find_by_ids(&spell_ids).await?;
        let groups = group_abilities(&spell_ids, spells);
        debug!(requested = spell_ids.len(), resolved = groups.len(), "Grouped item spells");
        Ok(groups)
    }
}
