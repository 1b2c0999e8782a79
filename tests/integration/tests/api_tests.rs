//! API Integration Tests
//!
//! Every test spawns its own server with in-memory storage and sessions, so
//! no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, axe_build, guide_request, session_from, test_config,
    AuditLogResponse, BuildResponse, CurrentUserResponse, ErrorBody, GuideResponse, ItemResponse,
    MemberResponse, TestServer, UpstreamStub, UserResponse, UsernameRequest, STUB_GUIDE,
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

/// Register a user, approve them with the given role, and sign them in
async fn active_member(server: &TestServer, admin: &str, role: &str) -> (UserResponse, String) {
    let request = UsernameRequest::unique();
    let response = server.post("/api/auth/register", &request).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .patch_session(
            &format!("/api/users/{}", user.id),
            admin,
            &json!({ "status": "active", "role": role }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.post("/api/auth/login", &request).await.unwrap();
    let session = session_from(&response).expect("login issues a session cookie");
    let current: CurrentUserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    (current.user, session)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready_in_memory() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "in_memory");
    assert_eq!(body["checks"]["sessions"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_creates_pending_guest() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = UsernameRequest::unique();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(user.name, request.username);
    assert_eq!(user.status, "pending");
    assert_eq!(user.role, "Guest");
}

#[tokio::test]
async fn test_register_duplicate_name_ignores_case() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = UsernameRequest::unique();
    server.post("/api/auth/register", &request).await.unwrap();

    let shouting = UsernameRequest::named(&request.username.to_uppercase());
    let response = server.post("/api/auth/register", &shouting).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.error.code, "USERNAME_TAKEN");
}

#[tokio::test]
async fn test_register_rejects_short_name() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/auth/register", &UsernameRequest::named("x"))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.message, "Username must be 2-32 characters.");
    assert_eq!(body.error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_requires_active_account() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = UsernameRequest::unique();
    server.post("/api/auth/register", &request).await.unwrap();

    let response = server.post("/api/auth/login", &request).await.unwrap();
    assert!(session_from(&response).is_none());
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "USER_NOT_ACTIVE");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/auth/login", &UsernameRequest::named("Nobody"))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_USER");
}

#[tokio::test]
async fn test_session_and_logout() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_session().await.unwrap();
    let (member, session) = active_member(&server, &admin, "Member").await;

    let response = server.get_session("/api/auth/session", &session).await.unwrap();
    let current: CurrentUserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(current.user.id, member.id);
    assert!(current.user.last_seen_at.is_some());
    assert_eq!(current.capabilities, vec!["CREATE_BUILD".to_string()]);

    let response = server
        .post_session("/api/auth/logout", &session, &json!({}))
        .await
        .unwrap();
    let cleared = response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with("sessionId="));
    assert!(cleared, "logout should clear the session cookie");
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_session("/api/auth/session", &session).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .client
        .post(format!("{}/api/auth/login-admin-test", server.base_url()))
        .send()
        .await
        .unwrap();

    let cookie = response
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("sessionId="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Path=/"));
}

#[tokio::test]
async fn test_logout_without_session_succeeds() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.post("/api/auth/logout", &json!({})).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_admin_test_login_reuses_account() {
    let server = TestServer::start().await.expect("Failed to start server");
    let first = server.admin_session().await.unwrap();
    let second = server.admin_session().await.unwrap();
    assert_ne!(first, second);

    let response = server.get_session("/api/users", &first).await.unwrap();
    let users: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(users.iter().filter(|u| u.name == "Admin").count(), 1);
    assert_eq!(users[0].role, "Guild Master");
}

#[tokio::test]
async fn test_admin_test_login_can_be_disabled() {
    let mut config = test_config().unwrap();
    config.auth.admin_test_login = false;
    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    let response = server.post("/api/auth/login-admin-test", &json!({})).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// User Administration Tests
// ============================================================================

#[tokio::test]
async fn test_admin_routes_require_session() {
    let server = TestServer::start().await.expect("Failed to start server");

    for path in ["/api/users", "/api/admin/logs", "/api/auth/session"] {
        let response = server.get(path).await.unwrap();
        let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
        assert_eq!(body.error.code, "UNAUTHENTICATED");
    }

    let response = server
        .get_session("/api/users", "not-a-real-session")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_officer_reads_but_cannot_manage() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_session().await.unwrap();
    let (_, officer) = active_member(&server, &admin, "Officer").await;
    let (member, _) = active_member(&server, &admin, "Member").await;

    let response = server.get_session("/api/users", &officer).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    let response = server.get_session("/api/admin/logs", &officer).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .patch_session(
            &format!("/api/users/{}", member.id),
            &officer,
            &json!({ "role": "Officer" }),
        )
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error.code, "FORBIDDEN");

    let response = server
        .delete_session(&format!("/api/users/{}", member.id), &officer)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_member_cannot_view_admin() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_session().await.unwrap();
    let (_, member) = active_member(&server, &admin, "Member").await;

    let response = server.get_session("/api/users", &member).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_update_user_writes_audit_entries() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_session().await.unwrap();
    let (member, _) = active_member(&server, &admin, "Member").await;

    let response = server
        .get_session("/api/admin/logs", &admin)
        .await
        .unwrap();
    let entries: Vec<AuditLogResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let about_member: Vec<&AuditLogResponse> = entries
        .iter()
        .filter(|e| e.target_id.as_deref() == Some(member.id.as_str()))
        .collect();

    // registration, status change, role change
    assert_eq!(about_member.len(), 3);
    // newest first
    assert_eq!(about_member[2].action, "user_registered");

    let role_change = about_member
        .iter()
        .find(|e| e.action == "user_role_changed")
        .unwrap();
    assert_eq!(role_change.actor_name, "Admin");
    assert_eq!(
        role_change.details,
        Some(json!({ "from": "Guest", "to": "Member" }))
    );

    let response = server
        .get_session("/api/admin/logs?limit=1", &admin)
        .await
        .unwrap();
    let limited: Vec<AuditLogResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(limited.len(), 1);

    let response = server
        .get_session("/api/admin/logs?limit=0", &admin)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_update_user_rejects_empty_and_unknown() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_session().await.unwrap();
    let (member, _) = active_member(&server, &admin, "Member").await;

    let response = server
        .patch_session(&format!("/api/users/{}", member.id), &admin, &json!({}))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.message, "Provide a status or role to update.");

    let response = server
        .patch_session(
            "/api/users/00000000-0000-0000-0000-000000000000",
            &admin,
            &json!({ "status": "active" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_cannot_delete_self() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_session().await.unwrap();

    let response = server.get_session("/api/auth/session", &admin).await.unwrap();
    let me: CurrentUserResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .delete_session(&format!("/api/users/{}", me.user.id), &admin)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "CANNOT_DELETE_SELF");
}

#[tokio::test]
async fn test_delete_user_ends_their_sessions() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_session().await.unwrap();
    let (member, session) = active_member(&server, &admin, "Member").await;

    let response = server
        .delete_session(&format!("/api/users/{}", member.id), &admin)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["message"], "User deleted successfully.");

    let response = server.get_session("/api/auth/session", &session).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get_session("/api/admin/logs?limit=1", &admin).await.unwrap();
    let entries: Vec<AuditLogResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(entries[0].action, "user_deleted");
    assert_eq!(
        entries[0].details,
        Some(json!({ "deletedUserName": member.name }))
    );
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[tokio::test]
async fn test_item_search() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/items?type=weapon&search=HACHA").await.unwrap();
    let items: Vec<ItemResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "T4_MAIN_AXE");
    assert_eq!(items[0].item_type, "weapon");

    let response = server.get("/api/items?type=weapon&search=arco").await.unwrap();
    let items: Vec<ItemResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(items.is_empty());

    let response = server.get("/api/items?type=helmet").await.unwrap();
    let items: Vec<ItemResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| !i.name.is_empty()));

    let response = server.get("/api/items").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.message, "Item type is required.");
}

#[tokio::test]
async fn test_item_spells_grouping() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/game/items/T4_MAIN_AXE/spells").await.unwrap();
    let groups: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(groups["Q"].as_array().unwrap().len(), 3);
    assert_eq!(groups["W"].as_array().unwrap().len(), 3);
    assert_eq!(groups["E"].as_array().unwrap().len(), 1);
    assert_eq!(groups["Passive"].as_array().unwrap().len(), 1);
    assert_eq!(groups["Q"][0]["id"], "AXE_CLEAVE");

    let response = server.get("/api/game/items/T4_OFF_SHIELD/spells").await.unwrap();
    let groups: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(groups, json!({}));

    let response = server.get("/api/game/items/T9_NOTHING/spells").await.unwrap();
    let groups: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(groups, json!({}));
}

// ============================================================================
// Build Tests
// ============================================================================

#[tokio::test]
async fn test_create_build_requires_session() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.post("/api/builds", &axe_build("Brawler")).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_create_and_fetch_build() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_session().await.unwrap();
    let (member, session) = active_member(&server, &admin, "Member").await;

    let response = server
        .post_session("/api/builds", &session, &axe_build("Brawler"))
        .await
        .unwrap();
    let created: BuildResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.title, "Brawler");
    assert_eq!(created.category, "PvP");
    assert_eq!(created.author, member.name);
    assert_eq!(created.equipment["weapon"]["id"], "T4_MAIN_AXE");
    assert_eq!(created.equipment["helmet"]["name"], "Casco de Soldado de Adepto");
    assert_eq!(created.abilities["Passive"]["id"], "PASSIVE_BLOODTHIRST");
    assert!(created.ai_guide.is_none());

    let response = server.get(&format!("/api/builds/{}", created.id)).await.unwrap();
    let fetched: BuildResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, created.id);

    let response = server.get("/api/builds").await.unwrap();
    let builds: Vec<BuildResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(builds.len(), 1);

    let response = server.get("/api/builds/not-a-build").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_create_build_rejects_bad_references() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_session().await.unwrap();

    let mut unknown = axe_build("Ghost axe");
    unknown["equipment"]["weapon"] = json!("T8_MAIN_NOPE");
    let response = server.post_session("/api/builds", &admin, &unknown).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.message, "Unknown item: T8_MAIN_NOPE");

    let mut mismatch = axe_build("Axe on the head");
    mismatch["equipment"]["helmet"] = json!("T4_MAIN_AXE");
    let response = server.post_session("/api/builds", &admin, &mismatch).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "SLOT_MISMATCH");

    let response = server.get("/api/builds").await.unwrap();
    let builds: Vec<BuildResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(builds.is_empty());
}

// ============================================================================
// Guild Tests
// ============================================================================

#[tokio::test]
async fn test_members_lists_active_users_online_first() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_session().await.unwrap();
    let (online, _) = active_member(&server, &admin, "Member").await;

    // approved but never logged in
    let request = UsernameRequest::unique();
    let response = server.post("/api/auth/register", &request).await.unwrap();
    let offline: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    server
        .patch_session(
            &format!("/api/users/{}", offline.id),
            &admin,
            &json!({ "status": "active" }),
        )
        .await
        .unwrap();

    // still pending
    server
        .post("/api/auth/register", &UsernameRequest::unique())
        .await
        .unwrap();

    let response = server.get("/api/guild/members").await.unwrap();
    let members: Vec<MemberResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(members.len(), 3);
    assert!(members.iter().any(|m| m.id == online.id && m.online));
    let last = members.last().unwrap();
    assert_eq!(last.id, offline.id);
    assert!(!last.online);
}

#[tokio::test]
async fn test_activity_feed_and_summary() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_session().await.unwrap();
    active_member(&server, &admin, "Member").await;

    let response = server.get("/api/guild/activity").await.unwrap();
    let events: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(events.len(), 2);
    assert!(events[0]["memberId"].is_string());

    let response = server.get("/api/guild/activity/summary").await.unwrap();
    let summary: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary["daily"].as_array().unwrap().len(), 7);
    assert_eq!(summary["hourly"].as_array().unwrap().len(), 24);
    assert_eq!(summary["totalEvents"], 2);
}

// ============================================================================
// AI Guide Tests
// ============================================================================

#[tokio::test]
async fn test_guide_without_api_key() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/ai/generate-build-guide", &guide_request(None))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();
    assert_eq!(body.message, "AI service is not configured. Missing API_KEY.");

    let response = server
        .post("/api/ai/generate-build-guide", &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_guide_is_cached_on_stored_build() {
    let upstream = UpstreamStub::start().await.expect("Failed to start upstream stub");
    let mut config = test_config().unwrap();
    config.ai.api_key = Some("test-key".to_string());
    config.ai.base_url = upstream.base_url();
    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    let admin = server.admin_session().await.unwrap();
    let response = server
        .post_session("/api/builds", &admin, &axe_build("Brawler"))
        .await
        .unwrap();
    let build: BuildResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let first: GuideResponse = assert_json(
        server
            .post("/api/ai/generate-build-guide", &guide_request(Some(&build.id)))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(first.guide, STUB_GUIDE);
    assert!(!first.cached);

    let second: GuideResponse = assert_json(
        server
            .post("/api/ai/generate-build-guide", &guide_request(Some(&build.id)))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(second.guide, STUB_GUIDE);
    assert!(second.cached);
    assert_eq!(upstream.calls(), 1);

    let response = server.get(&format!("/api/builds/{}", build.id)).await.unwrap();
    let stored: BuildResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stored.ai_guide.as_deref(), Some(STUB_GUIDE));

    // unsaved builds always go upstream
    let unsaved: GuideResponse = assert_json(
        server
            .post("/api/ai/generate-build-guide", &guide_request(None))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(!unsaved.cached);
    assert_eq!(upstream.calls(), 2);
}

#[tokio::test]
async fn test_slow_upstream_is_reported_as_upstream_failure() {
    let upstream = UpstreamStub::start_delayed(Duration::from_secs(3))
        .await
        .expect("Failed to start upstream stub");
    let mut config = test_config().unwrap();
    config.ai.api_key = Some("test-key".to_string());
    config.ai.base_url = upstream.base_url();
    config.ai.timeout_seconds = 1;
    config.api.request_timeout_seconds = 5;
    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    let response = server
        .post("/api/ai/generate-build-guide", &guide_request(None))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();
    assert_eq!(body.error.code, "UPSTREAM_FAILURE");
    assert_eq!(body.message, "Failed to generate AI guide.");
    assert_eq!(body.error.message, body.message);
    assert_eq!(upstream.calls(), 1);
}
