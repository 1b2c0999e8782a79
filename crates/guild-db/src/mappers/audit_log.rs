//! Audit log entry <-> model mapper

use guild_core::entities::AuditLogEntry;
use guild_core::value_objects::AuditLogId;

use crate::models::AuditLogModel;

impl From<AuditLogModel> for AuditLogEntry {
    fn from(model: AuditLogModel) -> Self {
        AuditLogEntry {
            id: AuditLogId::from_uuid(model.id),
            actor_id: model.actor_id,
            actor_name: model.actor_name,
            action: model.action,
            target_id: model.target_id,
            target_type: model.target_type,
            timestamp: model.created_at,
            details: model.details,
        }
    }
}
