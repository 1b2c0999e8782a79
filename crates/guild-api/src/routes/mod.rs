//! Route definitions
//!
//! All API routes organized by domain and mounted under /api.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{admin, ai, auth, builds, catalog, guild, health, users};
use crate::state::AppState;

/// Create the main API router
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (kept out of the rate limiter)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(build_routes())
        .merge(catalog_routes())
        .merge(guild_routes())
        .merge(ai_routes())
        .merge(admin_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/login-admin-test", post(auth::login_admin_test))
        .route("/auth/session", get(auth::session))
        .route("/auth/logout", post(auth::logout))
}

/// User administration routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/:user_id", patch(users::update_user).delete(users::delete_user))
}

/// Build routes
fn build_routes() -> Router<AppState> {
    Router::new()
        .route("/builds", get(builds::list_builds).post(builds::create_build))
        .route("/builds/:build_id", get(builds::get_build))
}

/// Catalog routes
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(catalog::find_items))
        .route("/game/items/:unique_name/spells", get(catalog::item_spells))
}

/// Guild roster and activity routes
fn guild_routes() -> Router<AppState> {
    Router::new()
        .route("/guild/members", get(guild::list_members))
        .route("/guild/activity", get(guild::recent_activity))
        .route("/guild/activity/summary", get(guild::activity_summary))
}

fn ai_routes() -> Router<AppState> {
    Router::new().route("/ai/generate-build-guide", post(ai::generate_build_guide))
}

fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/logs", get(admin::list_audit_logs))
}
