//! User administration handlers
//!
//! Listing, status/role changes, and deletion of guild accounts.

use axum::{
    extract::{Path, State},
    Json,
};
use guild_service::dto::{MessageResponse, UpdateUserRequest, UserResponse};
use guild_service::UserDirectoryService;

use crate::extractors::{SessionUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// List every user
///
/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    SessionUser(actor): SessionUser,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = UserDirectoryService::new(state.service_context());
    let users = service.list_users(&actor).await?;
    Ok(Json(users))
}

/// Change a user's status and/or role
///
/// PATCH /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    SessionUser(actor): SessionUser,
    Path(user_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserDirectoryService::new(state.service_context());
    let user = service.update_user(&actor, &user_id, request).await?;
    Ok(Json(user))
}

/// Delete a user and end their sessions
///
/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    SessionUser(actor): SessionUser,
    Path(user_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserDirectoryService::new(state.service_context());
    let response = service.delete_user(&actor, &user_id).await?;
    Ok(Json(response))
}
