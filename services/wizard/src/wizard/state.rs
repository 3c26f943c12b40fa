//! services/wizard/src/wizard/state.rs
//!
//! Defines the application's shared service bundle and the wizard's
//! screen-state vocabulary.

use crate::config::Config;
use company_profiler_core::ports::{
    CompanyDirectoryService, CompanySearchService, ImageHostingService, LogoSearchService,
    NarrativeGenerationService, ProfileGenerationService, UniquenessGenerationService,
};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Service Bundle)
//=========================================================================================

/// The shared service bundle, created once at startup and handed to the
/// controller. Every external collaborator is reached through its port
/// trait only.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub search: Arc<dyn CompanySearchService>,
    pub profiles: Arc<dyn ProfileGenerationService>,
    pub logos: Arc<dyn LogoSearchService>,
    pub uniqueness: Arc<dyn UniquenessGenerationService>,
    pub narrative: Arc<dyn NarrativeGenerationService>,
    pub images: Arc<dyn ImageHostingService>,
    pub directory: Arc<dyn CompanyDirectoryService>,
}

//=========================================================================================
// Screen (the wizard's state machine states)
//=========================================================================================

/// The screen currently mounted. Exactly one at a time; swaps are
/// synchronous on user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Search,
    ProfileReview,
    UniquenessReview,
    DifferentiatorSelection,
    /// Terminal: the document was persisted and onboarding initialized.
    /// Navigation out of the wizard belongs to the host.
    Persisted,
}

//=========================================================================================
// User-facing message text
//=========================================================================================

/// Shown when the search call fails; the result list is cleared alongside.
pub const SEARCH_FAILED_MESSAGE: &str = "An error occurred while searching. Please try again.";

/// Shown when profile generation fails after picking a search result.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate company profile. Please try again.";

/// Modal text for the duplicate-save conflict, distinct from the generic
/// failure text.
pub const DUPLICATE_SAVE_MESSAGE: &str = "Company already exist. Please try again.";

/// Modal text for any other persistence failure.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save company data. Please try again.";

/// Modal text when the profile was created but the dependent onboarding
/// initialization failed; the wizard stays put.
pub const ONBOARDING_INIT_FAILED_MESSAGE: &str =
    "Your profile was saved, but onboarding setup failed. Please try again.";
