//! Build <-> model mapper

use guild_core::entities::Build;
use guild_core::traits::AuthoredBuild;
use guild_core::value_objects::{BuildId, UserId};
use guild_core::DomainError;

use super::corrupt_column;
use crate::models::BuildModel;

impl TryFrom<BuildModel> for AuthoredBuild {
    type Error = DomainError;

    fn try_from(model: BuildModel) -> Result<Self, Self::Error> {
        let build = Build {
            id: BuildId::from_uuid(model.id),
            title: model.title,
            category: model
                .category
                .parse()
                .map_err(|e| corrupt_column("builds.category", e))?,
            description: model.description,
            author_id: UserId::from_uuid(model.author_id),
            equipment: model.equipment.0,
            consumables: model.consumables.0,
            abilities: model.abilities.0,
            ai_guide: model.ai_guide,
            created_at: model.created_at,
        };
        Ok(AuthoredBuild {
            build,
            author_name: model.author_name,
        })
    }
}
