//! Authentication service
//!
//! Handles registration, name-only login, session resolution, and logout.

use chrono::Utc;
use guild_core::{
    AuditAction, AuditLogEntry, DomainError, GuildRole, MemberActivityLog, SessionId, User,
    UserStatus,
};
use serde_json::json;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::dto::{LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new pending guest
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<User> {
        request.validate()?;
        let name = request.username.trim().to_string();

        if self.ctx.user_repo().find_by_name(&name).await?.is_some() {
            return Err(DomainError::UsernameTaken.into());
        }

        let user = User::register(name);
        self.ctx.user_repo().create(&user).await?;

        let entry = AuditLogEntry::by_system(AuditAction::UserRegistered)
            .targeting_user(&user)
            .with_details(json!({ "username": user.name }));
        self.ctx.audit_repo().append(&entry).await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Start a session for an active user
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<(User, SessionId)> {
        request.validate()?;
        let name = request.username.trim();

        let mut user = self
            .ctx
            .user_repo()
            .find_by_name(name)
            .await?
            .ok_or_else(|| {
                warn!(username = %name, "Login failed: unknown user");
                DomainError::UserNameNotFound(name.to_string())
            })?;

        if !user.is_active() {
            warn!(user_id = %user.id, status = %user.status.as_str(), "Login failed: user not active");
            return Err(DomainError::UserNotActive.into());
        }

        let session_id = self.open_session(&mut user).await?;
        info!(user_id = %user.id, "User logged in");
        Ok((user, session_id))
    }

    /// Sign in as the fixed development administrator, creating it on first use
    #[instrument(skip(self))]
    pub async fn login_admin_test(&self) -> ServiceResult<(User, SessionId)> {
        let settings = self.ctx.settings();
        if !settings.admin_test_login {
            return Err(ServiceError::not_found(
                "Admin test user",
                settings.admin_test_name.clone(),
            ));
        }
        let name = settings.admin_test_name.as_str();

        let mut user = match self.ctx.user_repo().find_by_name(name).await? {
            Some(mut user) => {
                if !user.is_active() || user.role != GuildRole::GuildMaster {
                    user.role = GuildRole::GuildMaster;
                    user.status = UserStatus::Active;
                    self.ctx.user_repo().update(&user).await?;
                    info!(user_id = %user.id, "Admin test user restored");
                }
                user
            }
            None => {
                let user = User::active(name.to_string(), GuildRole::GuildMaster);
                self.ctx.user_repo().create(&user).await?;
                info!(user_id = %user.id, "Admin test user created");
                user
            }
        };

        let session_id = self.open_session(&mut user).await?;
        Ok((user, session_id))
    }

    /// Resolve the user behind a session cookie
    ///
    /// Refreshes the user's presence at most once per minute.
    #[instrument(skip_all)]
    pub async fn resolve_session(&self, session_id: Option<&SessionId>) -> ServiceResult<User> {
        let session_id = session_id.ok_or(DomainError::Unauthenticated)?;

        let user_id = self
            .ctx
            .session_store()
            .get(session_id)
            .await?
            .ok_or(DomainError::Unauthenticated)?;

        let Some(mut user) = self.ctx.user_repo().find_by_id(user_id).await? else {
            // user deleted behind a live session
            self.ctx.session_store().remove_user(user_id).await?;
            debug!(user_id = %user_id, "Session pointed to a deleted user");
            return Err(DomainError::Unauthenticated.into());
        };

        let now = Utc::now();
        if user.needs_presence_touch(now) {
            self.ctx.user_repo().touch_last_seen(user.id, now).await?;
            user.last_seen_at = Some(now);
        }

        Ok(user)
    }

    /// Invalidate a session; unknown or missing ids are ignored
    #[instrument(skip_all)]
    pub async fn logout(&self, session_id: Option<&SessionId>) -> ServiceResult<()> {
        if let Some(session_id) = session_id {
            self.ctx.session_store().remove(session_id).await?;
            debug!("Session removed");
        }
        Ok(())
    }

    async fn open_session(&self, user: &mut User) -> ServiceResult<SessionId> {
        let session_id = SessionId::generate();
        self.ctx.session_store().insert(&session_id, user.id).await?;

        let now = Utc::now();
        self.ctx.user_repo().touch_last_seen(user.id, now).await?;
        user.last_seen_at = Some(now);

        self.ctx
            .activity_repo()
            .append(&MemberActivityLog::new(user.name.clone(), now))
            .await?;

        Ok(session_id)
    }
}
