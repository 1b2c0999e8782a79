//! Session cookie extractors
//!
//! Reads the session cookie and resolves it to the signed-in user.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use guild_common::SessionConfig;
use guild_core::{SessionId, User};
use guild_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Raw session id from the request cookie, if any
///
/// Never rejects; logout accepts requests without a session.
#[derive(Debug, Clone)]
pub struct SessionCookie(pub Option<SessionId>);

#[async_trait]
impl<S> FromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        let session_id = jar
            .get(&app_state.session_config().cookie_name)
            .and_then(|cookie| SessionId::from_client(cookie.value()));

        Ok(SessionCookie(session_id))
    }
}

/// Signed-in user resolved from the session cookie
///
/// Rejects with 401 when the cookie is missing or does not map to a live user.
#[derive(Debug, Clone)]
pub struct SessionUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let SessionCookie(session_id) = SessionCookie::from_request_parts(parts, state).await?;
        let app_state = AppState::from_ref(state);

        let user = AuthService::new(app_state.service_context())
            .resolve_session(session_id.as_ref())
            .await?;

        Ok(SessionUser(user))
    }
}

/// Cookie carrying a freshly issued session id
pub fn session_cookie(config: &SessionConfig, session_id: &SessionId) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), session_id.as_str().to_owned()))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .secure(config.cookie_secure)
        .build()
}

/// Cookie matching the session cookie's path, for removal from the jar
pub fn clear_session_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), String::new()))
        .path("/")
        .build()
}
