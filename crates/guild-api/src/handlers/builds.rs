//! Build handlers
//!
//! Shared character builds: list, fetch, and create.

use axum::{
    extract::{Path, State},
    Json,
};
use guild_service::dto::{BuildResponse, CreateBuildRequest};
use guild_service::BuildService;

use crate::extractors::{SessionUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// All builds, newest first
///
/// GET /builds
pub async fn list_builds(State(state): State<AppState>) -> ApiResult<Json<Vec<BuildResponse>>> {
    let service = BuildService::new(state.service_context());
    let builds = service.list_builds().await?;
    Ok(Json(builds))
}

/// Single build by id
///
/// GET /builds/{id}
pub async fn get_build(
    State(state): State<AppState>,
    Path(build_id): Path<String>,
) -> ApiResult<Json<BuildResponse>> {
    let service = BuildService::new(state.service_context());
    let build = service.get_build(&build_id).await?;
    Ok(Json(build))
}

/// Create a build authored by the session user
///
/// POST /builds
pub async fn create_build(
    State(state): State<AppState>,
    SessionUser(author): SessionUser,
    ValidatedJson(request): ValidatedJson<CreateBuildRequest>,
) -> ApiResult<Created<Json<BuildResponse>>> {
    let service = BuildService::new(state.service_context());
    let build = service.create_build(&author, request).await?;
    Ok(Created(Json(build)))
}
