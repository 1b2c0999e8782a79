//! AI build guide handler

use axum::{extract::State, Json};
use guild_service::dto::{GenerateGuideRequest, GuideResponse};
use guild_service::GuideService;

use crate::extractors::ValidatedJson;
use crate::response::ApiResult;
use crate::state::AppState;

/// Generate (or fetch the cached) guide for a build
///
/// POST /ai/generate-build-guide
pub async fn generate_build_guide(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GenerateGuideRequest>,
) -> ApiResult<Json<GuideResponse>> {
    let service = GuideService::new(state.service_context());
    let guide = service.generate(request).await?;
    Ok(Json(guide))
}
