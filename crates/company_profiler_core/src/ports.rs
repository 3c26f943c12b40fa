//! crates/company_profiler_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of the concrete search, generation, image-hosting
//! and persistence backends.

use async_trait::async_trait;

use crate::domain::{CompanyProfile, Differentiator, SearchResult, UniquenessCategory};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The resource already exists for this owner (duplicate save).
    #[error("Already exists: {0}")]
    Conflict(String),
    /// Rejected before any network call was made (bad input).
    #[error("{0}")]
    Validation(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CompanySearchService: Send + Sync {
    /// Runs a company search and returns the raw result list.
    async fn search(&self, query: &str) -> PortResult<Vec<SearchResult>>;
}

#[async_trait]
pub trait ProfileGenerationService: Send + Sync {
    /// Generates a full company profile from the composed company-info
    /// string. The returned document carries the given owner id and no
    /// persistent id; missing optional sub-fields come back as empty
    /// defaults, never as an error.
    async fn generate_profile(&self, company_info: &str, owner_id: &str)
        -> PortResult<CompanyProfile>;
}

#[async_trait]
pub trait LogoSearchService: Send + Sync {
    /// Looks up a hosted logo URL for the company, if one can be found.
    async fn search_logo(&self, company_name: &str, website: Option<&str>)
        -> PortResult<Option<String>>;
}

#[async_trait]
pub trait UniquenessGenerationService: Send + Sync {
    /// Generates the scored uniqueness category list for a profile.
    async fn generate_categories(&self, profile: &CompanyProfile)
        -> PortResult<Vec<UniquenessCategory>>;
}

#[async_trait]
pub trait NarrativeGenerationService: Send + Sync {
    /// Generates the short "why partner with us" narrative, nominally 3-4
    /// lines of plain text.
    async fn generate_intro(&self, profile: &CompanyProfile) -> PortResult<String>;
}

#[async_trait]
pub trait ImageHostingService: Send + Sync {
    /// Uploads an already-validated image and returns its hosted URL.
    async fn upload(&self, file_name: &str, mime: &str, bytes: Vec<u8>) -> PortResult<String>;
}

#[async_trait]
pub trait CompanyDirectoryService: Send + Sync {
    /// Creates the company document and returns the backend-assigned id.
    /// Fails with `PortError::Conflict` when a profile already exists for
    /// the owner.
    async fn create(
        &self,
        profile: &CompanyProfile,
        differentiators: &[Differentiator],
    ) -> PortResult<String>;

    /// Partial update scoped to a single changed field path.
    async fn update_field(&self, id: &str, path: &str, value: &str) -> PortResult<()>;

    /// Initializes the dependent onboarding-progress record keyed by the
    /// saved company id.
    async fn init_onboarding(&self, id: &str) -> PortResult<()>;
}
