//! User entity <-> model mapper

use guild_core::entities::User;
use guild_core::value_objects::UserId;
use guild_core::DomainError;

use super::corrupt_column;
use crate::models::UserModel;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::from_uuid(model.id),
            name: model.name,
            avatar_url: model.avatar_url,
            role: model.role.parse().map_err(|e| corrupt_column("users.role", e))?,
            status: model.status.parse().map_err(|e| corrupt_column("users.status", e))?,
            created_at: model.created_at,
            last_seen_at: model.last_seen_at,
        })
    }
}
