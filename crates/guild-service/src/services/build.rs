//! Build service
//!
//! Builds reference catalog entries by id on the way in and are stored with
//! resolved snapshots of those entries.

use std::collections::{BTreeMap, HashMap};

use guild_core::entities::MAX_BUILD_TITLE_LEN;
use guild_core::{
    AuthoredBuild, Build, BuildCategory, BuildId, Capabilities, DomainError, Item, ItemCategory,
    ItemRef, Spell, User,
};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{BuildResponse, CreateBuildRequest, ItemSelection};

use super::authorization::AuthorizationService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Build service
pub struct BuildService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BuildService<'a> {
    /// Create a new BuildService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All builds, newest first
    #[instrument(skip(self))]
    pub async fn list_builds(&self) -> ServiceResult<Vec<BuildResponse>> {
        let builds = self.ctx.build_repo().list().await?;
        Ok(builds.into_iter().map(BuildResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_build(&self, build_id: &str) -> ServiceResult<BuildResponse> {
        let id = BuildId::parse(build_id).map_err(|_| ServiceError::not_found("Build", build_id))?;
        let build = self
            .ctx
            .build_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::BuildNotFound(id))?;
        Ok(BuildResponse::from(build))
    }

    /// Validate, resolve references, and store a new build
    #[instrument(skip(self, author, request), fields(author_id = %author.id))]
    pub async fn create_build(
        &self,
        author: &User,
        request: CreateBuildRequest,
    ) -> ServiceResult<BuildResponse> {
        AuthorizationService::new().require(author, Capabilities::CREATE_BUILD)?;
        request.validate()?;

        let title = request.title.trim();
        if title.is_empty() {
            return Err(ServiceError::validation("Build title is required."));
        }
        if title.chars().count() > MAX_BUILD_TITLE_LEN {
            return Err(ServiceError::validation(format!(
                "Build title must be at most {MAX_BUILD_TITLE_LEN} characters."
            )));
        }
        let category = parse_category(request.category.as_deref())?;

        let mut build = Build::new(
            title.to_string(),
            category,
            request.description.trim().to_string(),
            author.id,
        );

        let items = self.fetch_items(&request).await?;
        for (slot_name, selection) in &request.equipment {
            let slot = parse_slot(slot_name)?;
            let target = build
                .equipment
                .slot_mut(slot)
                .ok_or_else(|| ServiceError::validation(format!("{slot} is not an equipment slot")))?;
            *target = resolve_item(&items, slot, selection.as_ref())?;
        }
        for (slot_name, selection) in &request.consumables {
            let slot = parse_slot(slot_name)?;
            let target = build
                .consumables
                .slot_mut(slot)
                .ok_or_else(|| ServiceError::validation(format!("{slot} is not a consumable slot")))?;
            *target = resolve_item(&items, slot, selection.as_ref())?;
        }

        build.abilities = self.resolve_abilities(&request.abilities).await?;

        self.ctx.build_repo().create(&build).await?;
        info!(build_id = %build.id, category = %build.category, "Build created");

        Ok(BuildResponse::from(AuthoredBuild {
            build,
            author_name: Some(author.name.clone()),
        }))
    }

    /// One batch lookup for every equipment and consumable selection
    async fn fetch_items(&self, request: &CreateBuildRequest) -> ServiceResult<HashMap<String, Item>> {
        let ids: Vec<String> = request
            .equipment
            .values()
            .chain(request.consumables.values())
            .flatten()
            .map(|selection| selection.id().to_string())
            .collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let items = self.ctx.item_repo().find_by_ids(&ids).await?;
        Ok(items.into_iter().map(|item| (item.id.clone(), item)).collect())
    }

    async fn resolve_abilities(
        &self,
        selections: &BTreeMap<String, Option<ItemSelection>>,
    ) -> ServiceResult<BTreeMap<String, Option<Spell>>> {
        let ids: Vec<String> = selections
            .values()
            .flatten()
            .map(|selection| selection.id().to_string())
            .collect();
        let spells: HashMap<String, Spell> = if ids.is_empty() {
            HashMap::new()
        } else {
            self.ctx
                .spell_repo()
                .find_by_ids(&ids)
                .await?
                .into_iter()
                .map(|spell| (spell.id.clone(), spell))
                .collect()
        };

        selections
            .iter()
            .map(|(key, selection)| {
                let spell = match selection {
                    Some(selection) => Some(spells.get(selection.id()).cloned().ok_or_else(|| {
                        ServiceError::validation(format!("Unknown spell: {}", selection.id()))
                    })?),
                    None => None,
                };
                Ok::<_, ServiceError>((key.clone(), spell))
            })
            .collect()
    }
}

fn parse_category(raw: Option<&str>) -> ServiceResult<BuildCategory> {
    let raw = raw
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ServiceError::validation("Build category is required."))?;
    raw.parse()
        .map_err(|_| ServiceError::validation(format!("Unknown build category: {raw}")))
}

fn parse_slot(raw: &str) -> ServiceResult<ItemCategory> {
    raw.parse()
        .map_err(|_| ServiceError::validation(format!("Unknown slot: {raw}")))
}

fn resolve_item(
    items: &HashMap<String, Item>,
    slot: ItemCategory,
    selection: Option<&ItemSelection>,
) -> ServiceResult<Option<ItemRef>> {
    let Some(selection) = selection else {
        return Ok(None);
    };
    let item = items
        .get(selection.id())
        .ok_or_else(|| ServiceError::validation(format!("Unknown item: {}", selection.id())))?;
    if item.category != slot {
        return Err(DomainError::SlotMismatch {
            item: item.id.clone(),
            slot: slot.to_string(),
        }
        .into());
    }
    Ok(Some(item.to_ref()))
}
