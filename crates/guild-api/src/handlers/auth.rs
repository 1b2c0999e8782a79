//! Authentication handlers
//!
//! Endpoints for registration, login, session lookup, and logout.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use guild_core::{SessionId, User};
use guild_service::dto::{CurrentUserResponse, LoginRequest, MessageResponse, RegisterRequest, UserResponse};
use guild_service::AuthService;

use crate::extractors::{clear_session_cookie, session_cookie, SessionCookie, SessionUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new (pending) user
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<UserResponse>>> {
    let service = AuthService::new(state.service_context());
    let user = service.register(request).await?;
    Ok(Created(Json(UserResponse::from(user))))
}

/// Login by username
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<CurrentUserResponse>)> {
    let service = AuthService::new(state.service_context());
    let (user, session_id) = service.login(request).await?;
    Ok(signed_in(&state, jar, &user, &session_id))
}

/// Development shortcut signing in as the configured Guild Master
///
/// POST /auth/login-admin-test
pub async fn login_admin_test(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<CurrentUserResponse>)> {
    let service = AuthService::new(state.service_context());
    let (user, session_id) = service.login_admin_test().await?;
    Ok(signed_in(&state, jar, &user, &session_id))
}

/// Current session's user
///
/// GET /auth/session
pub async fn session(SessionUser(user): SessionUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse::from(user))
}

/// Logout; succeeds with or without a session
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    SessionCookie(session_id): SessionCookie,
) -> ApiResult<(CookieJar, Json<MessageResponse>)> {
    let service = AuthService::new(state.service_context());
    service.logout(session_id.as_ref()).await?;

    let jar = jar.remove(clear_session_cookie(state.session_config()));
    Ok((jar, Json(MessageResponse::new("Logout successful."))))
}

fn signed_in(
    state: &AppState,
    jar: CookieJar,
    user: &User,
    session_id: &SessionId,
) -> (CookieJar, Json<CurrentUserResponse>) {
    let jar = jar.add(session_cookie(state.session_config(), session_id));
    (jar, Json(CurrentUserResponse::from(user)))
}
