//! Member activity <-> model mapper

use guild_core::entities::MemberActivityLog;
use guild_core::value_objects::ActivityLogId;

use crate::models::MemberActivityModel;

impl From<MemberActivityModel> for MemberActivityLog {
    fn from(model: MemberActivityModel) -> Self {
        MemberActivityLog {
            id: ActivityLogId::from_uuid(model.id),
            member_name: model.member_name,
            timestamp: model.created_at,
        }
    }
}
