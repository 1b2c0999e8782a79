//! Admin handlers

use axum::{extract::State, Json};
use guild_service::dto::{AuditLogQuery, AuditLogResponse};
use guild_service::AuditLogService;

use crate::extractors::{SessionUser, ValidatedQuery};
use crate::response::ApiResult;
use crate::state::AppState;

/// Audit log, newest first
///
/// GET /admin/logs?limit=
pub async fn list_audit_logs(
    State(state): State<AppState>,
    SessionUser(actor): SessionUser,
    ValidatedQuery(query): ValidatedQuery<AuditLogQuery>,
) -> ApiResult<Json<Vec<AuditLogResponse>>> {
    let service = AuditLogService::new(state.service_context());
    let entries = service.list(&actor, query.limit).await?;
    Ok(Json(entries))
}
