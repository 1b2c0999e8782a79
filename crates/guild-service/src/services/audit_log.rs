//! Audit log service

use guild_core::{Capabilities, User};
use tracing::instrument;

use crate::dto::AuditLogResponse;

use super::authorization::AuthorizationService;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Read access to the append-only audit trail
pub struct AuditLogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuditLogService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Entries newest first; `limit` of `None` returns everything
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn list(&self, actor: &User, limit: Option<i64>) -> ServiceResult<Vec<AuditLogResponse>> {
        AuthorizationService::new().require(actor, Capabilities::VIEW_ADMIN)?;
        let entries = self.ctx.audit_repo().list_recent(limit).await?;
        Ok(entries.into_iter().map(AuditLogResponse::from).collect())
    }
}
