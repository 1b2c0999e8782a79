//! Guild roster and activity handlers

use axum::{extract::State, Json};
use guild_service::dto::{ActivityEventResponse, ActivitySummaryResponse, MemberResponse};
use guild_service::GuildService;

use crate::response::ApiResult;
use crate::state::AppState;

/// Active members, online first
///
/// GET /guild/members
pub async fn list_members(State(state): State<AppState>) -> ApiResult<Json<Vec<MemberResponse>>> {
    let service = GuildService::new(state.service_context());
    let members = service.list_members().await?;
    Ok(Json(members))
}

/// Most recent login events
///
/// GET /guild/activity
pub async fn recent_activity(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ActivityEventResponse>>> {
    let service = GuildService::new(state.service_context());
    let events = service.recent_activity().await?;
    Ok(Json(events))
}

/// Login counts by weekday and by hour
///
/// GET /guild/activity/summary
pub async fn activity_summary(
    State(state): State<AppState>,
) -> ApiResult<Json<ActivitySummaryResponse>> {
    let service = GuildService::new(state.service_context());
    let summary = service.activity_summary().await?;
    Ok(Json(summary))
}
