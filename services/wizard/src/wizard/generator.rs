//! services/wizard/src/wizard/generator.rs
//!
//! Wraps the uniqueness and narrative ports with the deterministic fallback
//! policy: each entry point independently catches generation failure and
//! substitutes the industry-keyed default content instead of propagating the
//! error to the screen.

use company_profiler_core::{
    domain::{CompanyProfile, UniquenessCategory, UniquenessContent},
    ports::{NarrativeGenerationService, UniquenessGenerationService},
    uniqueness::{fallback_categories, FALLBACK_INTRO},
};
use std::sync::Arc;
use tracing::warn;

/// Produces uniqueness content for a profile, with per-part fallback.
/// Every call fully replaces prior content of the same kind; nothing is
/// cached or merged.
#[derive(Clone)]
pub struct UniquenessGenerator {
    categories: Arc<dyn UniquenessGenerationService>,
    narrative: Arc<dyn NarrativeGenerationService>,
}

impl UniquenessGenerator {
    pub fn new(
        categories: Arc<dyn UniquenessGenerationService>,
        narrative: Arc<dyn NarrativeGenerationService>,
    ) -> Self {
        Self {
            categories,
            narrative,
        }
    }

    /// Generates the narrative only. Falls back to the canned sentence.
    pub async fn generate_intro_only(&self, profile: &CompanyProfile) -> String {
        match self.narrative.generate_intro(profile).await {
            Ok(intro) => intro,
            Err(e) => {
                warn!("intro generation failed, using fallback narrative: {e}");
                FALLBACK_INTRO.to_string()
            }
        }
    }

    /// Generates the category list only. Falls back to the industry-keyed
    /// default set.
    pub async fn generate_categories_only(
        &self,
        profile: &CompanyProfile,
    ) -> Vec<UniquenessCategory> {
        match self.categories.generate_categories(profile).await {
            Ok(categories) => categories,
            Err(e) => {
                warn!("category generation failed, using fallback set: {e}");
                let industry =
                    (!profile.industry.is_empty()).then_some(profile.industry.as_str());
                fallback_categories(industry)
            }
        }
    }

    /// Generates both parts. The fallbacks are independent: one part can
    /// come back generated while the other substitutes its default.
    pub async fn generate_all(&self, profile: &CompanyProfile) -> UniquenessContent {
        UniquenessContent {
            intro: self.generate_intro_only(profile).await,
            categories: self.generate_categories_only(profile).await,
        }
    }
}
