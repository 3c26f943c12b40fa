//! services/wizard/src/wizard/testing.rs
//!
//! In-memory port implementations used by the controller and generator
//! tests. Each mock is deliberately tiny: fixed data in, recorded calls out.

use crate::config::{Config, DeploymentMode};
use crate::wizard::state::AppState;
use async_trait::async_trait;
use company_profiler_core::{
    domain::{CompanyProfile, Differentiator, SearchResult, UniquenessCategory},
    ports::{
        CompanyDirectoryService, CompanySearchService, ImageHostingService, LogoSearchService,
        NarrativeGenerationService, PortError, PortResult, ProfileGenerationService,
        UniquenessGenerationService,
    },
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use tracing::Level;

pub fn test_config() -> Config {
    Config {
        log_level: Level::INFO,
        deployment_mode: DeploymentMode::Standalone,
        session_user_id: None,
        openai_api_key: None,
        profile_model: "gpt-4o-mini".to_string(),
        uniqueness_model: "gpt-4o-mini".to_string(),
        intro_model: "gpt-4o-mini".to_string(),
        search_api_key: "test-key".to_string(),
        search_engine_id: "test-cx".to_string(),
        backend_url: "http://localhost:3000/api".to_string(),
        upload_url: "http://localhost:9000/upload".to_string(),
        upload_preset: "default".to_string(),
        max_upload_mb: 10,
    }
}

/// An `AppState` wired entirely to benign mocks; tests replace the ports
/// they care about.
pub fn base_state() -> AppState {
    AppState {
        config: Arc::new(test_config()),
        search: Arc::new(FixedSearch(Vec::new())),
        profiles: Arc::new(FailingProfileGen),
        logos: Arc::new(NoLogo),
        uniqueness: Arc::new(FailingUniqueness),
        narrative: Arc::new(FailingNarrative),
        images: Arc::new(CountingImageHost::new("https://img.example/hosted.png")),
        directory: Arc::new(MockDirectory::default()),
    }
}

//=========================================================================================
// Search
//=========================================================================================

pub struct FixedSearch(pub Vec<SearchResult>);

#[async_trait]
impl CompanySearchService for FixedSearch {
    async fn search(&self, _query: &str) -> PortResult<Vec<SearchResult>> {
        Ok(self.0.clone())
    }
}

/// Succeeds on the first call, fails on every later one.
pub struct FlakySearch {
    pub results: Vec<SearchResult>,
    calls: AtomicUsize,
}

impl FlakySearch {
    pub fn new(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CompanySearchService for FlakySearch {
    async fn search(&self, _query: &str) -> PortResult<Vec<SearchResult>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(self.results.clone())
        } else {
            Err(PortError::Unexpected("search backend down".to_string()))
        }
    }
}

//=========================================================================================
// Profile generation
//=========================================================================================

pub struct RecordingProfileGen {
    pub profile: CompanyProfile,
    pub seen_info: Mutex<Vec<String>>,
    pub seen_owner: Mutex<Vec<String>>,
}

impl RecordingProfileGen {
    pub fn returning(profile: CompanyProfile) -> Self {
        Self {
            profile,
            seen_info: Mutex::new(Vec::new()),
            seen_owner: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ProfileGenerationService for RecordingProfileGen {
    async fn generate_profile(
        &self,
        company_info: &str,
        owner_id: &str,
    ) -> PortResult<CompanyProfile> {
        self.seen_info.lock().unwrap().push(company_info.to_string());
        self.seen_owner.lock().unwrap().push(owner_id.to_string());
        let mut profile = self.profile.clone();
        profile.user_id = owner_id.to_string();
        profile.id = None;
        Ok(profile)
    }
}

pub struct FailingProfileGen;

#[async_trait]
impl ProfileGenerationService for FailingProfileGen {
    async fn generate_profile(
        &self,
        _company_info: &str,
        _owner_id: &str,
    ) -> PortResult<CompanyProfile> {
        Err(PortError::Unexpected("model unavailable".to_string()))
    }
}

//=========================================================================================
// Logo lookup
//=========================================================================================

pub struct NoLogo;

#[async_trait]
impl LogoSearchService for NoLogo {
    async fn search_logo(
        &self,
        _company_name: &str,
        _website: Option<&str>,
    ) -> PortResult<Option<String>> {
        Ok(None)
    }
}

pub struct FixedLogo(pub String);

#[async_trait]
impl LogoSearchService for FixedLogo {
    async fn search_logo(
        &self,
        _company_name: &str,
        _website: Option<&str>,
    ) -> PortResult<Option<String>> {
        Ok(Some(self.0.clone()))
    }
}

pub struct FailingLogo;

#[async_trait]
impl LogoSearchService for FailingLogo {
    async fn search_logo(
        &self,
        _company_name: &str,
        _website: Option<&str>,
    ) -> PortResult<Option<String>> {
        Err(PortError::Unexpected("logo backend down".to_string()))
    }
}

//=========================================================================================
// Uniqueness and narrative generation
//=========================================================================================

pub struct FixedUniqueness(pub Vec<UniquenessCategory>);

#[async_trait]
impl UniquenessGenerationService for FixedUniqueness {
    async fn generate_categories(
        &self,
        _profile: &CompanyProfile,
    ) -> PortResult<Vec<UniquenessCategory>> {
        Ok(self.0.clone())
    }
}

pub struct FailingUniqueness;

#[async_trait]
impl UniquenessGenerationService for FailingUniqueness {
    async fn generate_categories(
        &self,
        _profile: &CompanyProfile,
    ) -> PortResult<Vec<UniquenessCategory>> {
        Err(PortError::Unexpected("model unavailable".to_string()))
    }
}

pub struct FixedNarrative(pub String);

#[async_trait]
impl NarrativeGenerationService for FixedNarrative {
    async fn generate_intro(&self, _profile: &CompanyProfile) -> PortResult<String> {
        Ok(self.0.clone())
    }
}

pub struct FailingNarrative;

#[async_trait]
impl NarrativeGenerationService for FailingNarrative {
    async fn generate_intro(&self, _profile: &CompanyProfile) -> PortResult<String> {
        Err(PortError::Unexpected("model unavailable".to_string()))
    }
}

//=========================================================================================
// Image hosting
//=========================================================================================

pub struct CountingImageHost {
    pub url: String,
    pub calls: AtomicUsize,
}

impl CountingImageHost {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ImageHostingService for CountingImageHost {
    async fn upload(&self, _file_name: &str, _mime: &str, _bytes: Vec<u8>) -> PortResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.url.clone())
    }
}

//=========================================================================================
// Company backend
//=========================================================================================

#[derive(Default)]
pub struct MockDirectory {
    pub conflict_on_create: bool,
    pub fail_create: bool,
    pub fail_onboarding: bool,
    pub fail_update: bool,
    pub create_calls: AtomicUsize,
    pub onboarding_calls: AtomicUsize,
    pub updates: Mutex<Vec<(String, String, String)>>,
}

impl MockDirectory {
    pub const ASSIGNED_ID: &'static str = "company-1";
}

#[async_trait]
impl CompanyDirectoryService for MockDirectory {
    async fn create(
        &self,
        _profile: &CompanyProfile,
        _differentiators: &[Differentiator],
    ) -> PortResult<String> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.conflict_on_create {
            return Err(PortError::Conflict(
                "a profile already exists for this owner".to_string(),
            ));
        }
        if self.fail_create {
            return Err(PortError::Unexpected("backend unavailable".to_string()));
        }
        Ok(Self::ASSIGNED_ID.to_string())
    }

    async fn update_field(&self, id: &str, path: &str, value: &str) -> PortResult<()> {
        self.updates
            .lock()
            .unwrap()
            .push((id.to_string(), path.to_string(), value.to_string()));
        if self.fail_update {
            return Err(PortError::Unexpected("backend unavailable".to_string()));
        }
        Ok(())
    }

    async fn init_onboarding(&self, _id: &str) -> PortResult<()> {
        self.onboarding_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_onboarding {
            return Err(PortError::Unexpected(
                "onboarding service unavailable".to_string(),
            ));
        }
        Ok(())
    }
}
