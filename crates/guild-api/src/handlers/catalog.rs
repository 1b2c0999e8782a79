//! Game catalog handlers

use axum::{
    extract::{Path, State},
    Json,
};
use guild_core::AbilityGroups;
use guild_service::dto::{ItemQuery, ItemResponse};
use guild_service::CatalogService;

use crate::extractors::ValidatedQuery;
use crate::response::ApiResult;
use crate::state::AppState;

/// Items of one category, optionally filtered by name
///
/// GET /items?type=&search=
pub async fn find_items(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ItemQuery>,
) -> ApiResult<Json<Vec<ItemResponse>>> {
    let service = CatalogService::new(state.service_context());
    let items = service.find_items(query).await?;
    Ok(Json(items))
}

/// Abilities of an item grouped into Q/W/E/Passive
///
/// GET /game/items/{uniqueName}/spells
pub async fn item_spells(
    State(state): State<AppState>,
    Path(unique_name): Path<String>,
) -> ApiResult<Json<AbilityGroups>> {
    let service = CatalogService::new(state.service_context());
    let groups = service.item_abilities(&unique_name).await?;
    Ok(Json(groups))
}
