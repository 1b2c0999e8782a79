//! Build guide service
//!
//! Renders the guide prompt for a posted build, calls the configured
//! generator, and caches the result on stored builds.

use guild_core::{BuildId, ItemCategory};
use tracing::{error, info, instrument, warn};

use crate::dto::{GenerateGuideRequest, GuideBuildPayload, GuideResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub const NOT_CONFIGURED_MESSAGE: &str = "AI service is not configured. Missing API_KEY.";
pub const MISSING_BUILD_MESSAGE: &str = "Build data is required.";
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate AI guide.";

const EMPTY_SLOT: &str = "N/A";

/// Build guide service
pub struct GuideService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GuideService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Guide for the posted build, served from cache when the build has one
    #[instrument(skip(self, request))]
    pub async fn generate(&self, request: GenerateGuideRequest) -> ServiceResult<GuideResponse> {
        let payload = request
            .build
            .ok_or_else(|| ServiceError::validation(MISSING_BUILD_MESSAGE))?;

        let stored_id = payload
            .id
            .as_deref()
            .and_then(|id| BuildId::parse(id).ok());

        let mut stored = None;
        if let Some(id) = stored_id {
            if let Some(authored) = self.ctx.build_repo().find_by_id(id).await? {
                if let Some(guide) = authored.build.ai_guide {
                    info!(build_id = %id, "Serving cached guide");
                    return Ok(GuideResponse {
                        guide,
                        cached: true,
                    });
                }
                stored = Some(id);
            }
        }

        let generator = self
            .ctx
            .guide_generator()
            .ok_or_else(|| ServiceError::upstream(NOT_CONFIGURED_MESSAGE))?;

        let prompt = render_prompt(&payload, &self.ctx.settings().guide_language);
        let guide = generator.generate(&prompt).await.map_err(|e| {
            error!(error = %e, "Guide generation failed");
            ServiceError::upstream(GENERATION_FAILED_MESSAGE)
        })?;

        if let Some(id) = stored {
            // the guide is still returned if caching fails
            if let Err(e) = self.ctx.build_repo().set_ai_guide(id, &guide).await {
                warn!(build_id = %id, error = %e, "Failed to cache guide");
            }
        }

        Ok(GuideResponse {
            guide,
            cached: false,
        })
    }
}

/// Fixed guide prompt for a build
pub fn render_prompt(build: &GuideBuildPayload, language: &str) -> String {
    let slot = |category: ItemCategory| build.slot_name(category.as_str()).unwrap_or(EMPTY_SLOT);

    format!(
        "You are an expert player of the MMORPG Albion Online. Write a concise, useful guide \
for the following character build. The guide must be written in {language} and formatted in markdown.

**Build details:**
- **Title**: {title}
- **Category**: {category}
- **Description**: {description}

**Equipment:**
- **Main hand**: {weapon}
- **Off hand**: {offhand}
- **Head**: {helmet}
- **Chest**: {chest}
- **Boots**: {boots}
- **Cape**: {cape}

**Consumables:**
- **Potion**: {potion}
- **Food**: {food}

**The guide must cover:**
1. **General strategy**: how to play this build effectively in its category ({category}).
2. **Strengths**: the main advantages of this build (mobility, burst damage, crowd control, etc.).
3. **Weaknesses**: its main drawbacks and which matchups or situations to avoid.
4. **Rotation/Combos**: a short explanation of ability combos where relevant.

Keep the guide clear, beginner friendly, and focused on practical advice. Use bold text for headings.",
        title = build.title,
        category = build.category,
        description = build.description,
        weapon = slot(ItemCategory::Weapon),
        offhand = slot(ItemCategory::Offhand),
        helmet = slot(ItemCategory::Helmet),
        chest = slot(ItemCategory::Chest),
        boots = slot(ItemCategory::Boots),
        cape = slot(ItemCategory::Cape),
        potion = slot(ItemCategory::Potion),
        food = slot(ItemCategory::Food),
    )
}
