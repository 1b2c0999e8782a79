//! User directory service
//!
//! Admin listing, approval, role changes, and deletion of accounts. Every
//! mutation leaves an audit entry.

use guild_core::{AuditAction, AuditLogEntry, Capabilities, DomainError, User, UserId};
use serde_json::json;
use tracing::{info, instrument};

use crate::dto::{MessageResponse, UpdateUserRequest, UserResponse};

use super::authorization::AuthorizationService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User directory service
pub struct UserDirectoryService<'a> {
    ctx: &'a ServiceContext,
    guard: AuthorizationService,
}

impl<'a> UserDirectoryService<'a> {
    /// Create a new UserDirectoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self {
            ctx,
            guard: AuthorizationService::new(),
        }
    }

    /// All accounts, newest first
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn list_users(&self, actor: &User) -> ServiceResult<Vec<UserResponse>> {
        self.guard.require(actor, Capabilities::VIEW_ADMIN)?;
        let users = self.ctx.user_repo().list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Change status and/or role of an account
    #[instrument(skip(self, actor, request), fields(actor_id = %actor.id))]
    pub async fn update_user(
        &self,
        actor: &User,
        target_id: &str,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        self.guard.require(actor, Capabilities::MANAGE_USERS)?;

        if request.is_empty() {
            return Err(ServiceError::validation("Provide a status or role to update."));
        }

        let mut user = self.find_target(target_id).await?;
        let mut entries = Vec::new();

        if let Some(status) = request.status.filter(|s| *s != user.status) {
            entries.push(
                AuditLogEntry::by_user(actor, AuditAction::UserStatusChanged)
                    .targeting_user(&user)
                    .with_details(json!({ "from": user.status.as_str(), "to": status.as_str() })),
            );
            user.status = status;
        }

        if let Some(role) = request.role.filter(|r| *r != user.role) {
            entries.push(
                AuditLogEntry::by_user(actor, AuditAction::UserRoleChanged)
                    .targeting_user(&user)
                    .with_details(json!({ "from": user.role.as_str(), "to": role.as_str() })),
            );
            user.role = role;
        }

        if !entries.is_empty() {
            self.ctx.user_repo().update(&user).await?;
            for entry in &entries {
                self.ctx.audit_repo().append(entry).await?;
            }
            info!(
                user_id = %user.id,
                status = %user.status.as_str(),
                role = %user.role,
                "User updated"
            );
        }

        Ok(UserResponse::from(user))
    }

    /// Remove an account and every session it holds
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn delete_user(&self, actor: &User, target_id: &str) -> ServiceResult<MessageResponse> {
        self.guard.require(actor, Capabilities::MANAGE_USERS)?;

        // self-deletion is refused before the target is looked up
        if UserId::parse(target_id).is_ok_and(|id| id == actor.id) {
            return Err(DomainError::CannotDeleteSelf.into());
        }

        let user = self.find_target(target_id).await?;
        self.ctx.user_repo().delete(user.id).await?;
        self.ctx.session_store().remove_user(user.id).await?;

        let entry = AuditLogEntry::by_user(actor, AuditAction::UserDeleted)
            .targeting_user(&user)
            .with_details(json!({ "deletedUserName": user.name }));
        self.ctx.audit_repo().append(&entry).await?;

        info!(user_id = %user.id, name = %user.name, "User deleted");
        Ok(MessageResponse::new("User deleted successfully."))
    }

    async fn find_target(&self, target_id: &str) -> ServiceResult<User> {
        let id = UserId::parse(target_id).map_err(|_| ServiceError::not_found("User", target_id))?;
        self.ctx
            .user_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(id).into())
    }
}
