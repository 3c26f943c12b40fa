//! services/wizard/src/wizard/controller.rs
//!
//! The top-level wizard state machine: Search → ProfileReview →
//! UniquenessReview → DifferentiatorSelection → Persisted. The controller
//! exclusively owns the in-flight profile document; screens read it and all
//! mutation funnels through the commit paths here.

use crate::wizard::{
    generator::UniquenessGenerator,
    state::{
        AppState, Screen, DUPLICATE_SAVE_MESSAGE, GENERATION_FAILED_MESSAGE,
        ONBOARDING_INIT_FAILED_MESSAGE, SAVE_FAILED_MESSAGE, SEARCH_FAILED_MESSAGE,
    },
};
use company_profiler_core::{
    domain::{CompanyProfile, Differentiator, OwnerIdentity, SearchResult, UniquenessContent},
    fields::{ProfileEditor, ProfileField},
    logo, media,
    ports::{PortError, PortResult},
    uniqueness::CategoryField,
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

//=========================================================================================
// WizardController
//=========================================================================================

pub struct WizardController {
    state: AppState,
    identity: OwnerIdentity,
    generator: UniquenessGenerator,

    screen: Screen,
    search_results: Vec<SearchResult>,
    search_error: Option<String>,
    profile: Option<CompanyProfile>,
    editor: ProfileEditor,
    uniqueness: Option<UniquenessContent>,
    selected: Vec<Differentiator>,
    modal: Option<String>,

    // One in-flight operation per class; the triggering control is disabled
    // while its flag is set.
    searching: bool,
    generating: bool,
    uploading: bool,
    persisting: bool,
    syncing: Arc<AtomicBool>,
    sync_failed: Arc<AtomicBool>,
}

impl WizardController {
    /// Starts a fresh wizard on the search screen. The owner identity is
    /// resolved by the caller exactly once and fixed for the session.
    pub fn new(state: AppState, identity: OwnerIdentity) -> Self {
        let generator =
            UniquenessGenerator::new(state.uniqueness.clone(), state.narrative.clone());
        Self {
            state,
            identity,
            generator,
            screen: Screen::Search,
            search_results: Vec::new(),
            search_error: None,
            profile: None,
            editor: ProfileEditor::new(),
            uniqueness: None,
            selected: Vec::new(),
            modal: None,
            searching: false,
            generating: false,
            uploading: false,
            persisting: false,
            syncing: Arc::new(AtomicBool::new(false)),
            sync_failed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Resumes review of an existing document (e.g. a profile the owner
    /// already persisted), starting on the profile screen.
    pub fn resume(state: AppState, identity: OwnerIdentity, profile: CompanyProfile) -> Self {
        let mut controller = Self::new(state, identity);
        controller.profile = Some(profile);
        controller.screen = Screen::ProfileReview;
        controller
    }

    //=====================================================================================
    // Read accessors
    //=====================================================================================

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn search_results(&self) -> &[SearchResult] {
        &self.search_results
    }

    pub fn search_error(&self) -> Option<&str> {
        self.search_error.as_deref()
    }

    pub fn profile(&self) -> Option<&CompanyProfile> {
        self.profile.as_ref()
    }

    pub fn uniqueness(&self) -> Option<&UniquenessContent> {
        self.uniqueness.as_ref()
    }

    pub fn selected_differentiators(&self) -> &[Differentiator] {
        &self.selected
    }

    pub fn is_selected(&self, differentiator: Differentiator) -> bool {
        self.selected.contains(&differentiator)
    }

    pub fn modal(&self) -> Option<&str> {
        self.modal.as_deref()
    }

    pub fn editor(&self) -> &ProfileEditor {
        &self.editor
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn is_persisting(&self) -> bool {
        self.persisting
    }

    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::SeqCst)
    }

    /// Transient indicator that the most recent best-effort field sync
    /// failed. The local value is kept either way.
    pub fn sync_failed(&self) -> bool {
        self.sync_failed.load(Ordering::SeqCst)
    }

    //=====================================================================================
    // Search screen
    //=====================================================================================

    /// Runs a company search. On failure the result list is cleared and an
    /// inline error is shown; the wizard stays on the search screen.
    pub async fn search(&mut self, query: &str) {
        if self.screen != Screen::Search || self.searching || query.trim().is_empty() {
            return;
        }
        self.searching = true;
        self.search_error = None;
        self.search_results.clear();

        match self.state.search.search(query).await {
            Ok(results) => {
                info!("search returned {} results", results.len());
                self.search_results = results;
            }
            Err(e) => {
                error!("company search failed: {e}");
                self.search_error = Some(SEARCH_FAILED_MESSAGE.to_string());
            }
        }
        self.searching = false;
    }

    /// Generates a profile from the chosen search hit and, on success,
    /// enters profile review. The hit list is discarded once a profile
    /// exists; on failure the wizard stays on search with an error.
    pub async fn select_result(&mut self, index: usize) {
        if self.screen != Screen::Search || self.generating {
            return;
        }
        let Some(result) = self.search_results.get(index).cloned() else {
            return;
        };
        self.generating = true;
        self.search_error = None;

        let company_info = result.company_info();
        match self
            .state
            .profiles
            .generate_profile(&company_info, self.identity.user_id())
            .await
        {
            Ok(mut profile) => {
                if profile.logo.is_empty() {
                    self.attach_logo(&mut profile).await;
                }
                info!("generated profile for '{}'", profile.name);
                self.profile = Some(profile);
                self.search_results.clear();
                self.screen = Screen::ProfileReview;
            }
            Err(e) => {
                error!("profile generation failed: {e}");
                self.search_error = Some(GENERATION_FAILED_MESSAGE.to_string());
            }
        }
        self.generating = false;
    }

    /// Best-effort logo lookup for a freshly generated profile. A miss or a
    /// lookup failure leaves the logo empty; the screen falls back to its
    /// placeholder rendering.
    async fn attach_logo(&self, profile: &mut CompanyProfile) {
        let website =
            (!profile.contact.website.is_empty()).then_some(profile.contact.website.as_str());
        match self.state.logos.search_logo(&profile.name, website).await {
            Ok(Some(url)) => profile.logo = url,
            Ok(None) => {}
            Err(e) => warn!("logo lookup failed: {e}"),
        }
    }

    //=====================================================================================
    // Profile review: field editing with optimistic commit
    //=====================================================================================

    pub fn begin_edit(&mut self, field: ProfileField) {
        if let Some(profile) = self.profile.as_ref() {
            self.editor.begin(field, profile);
        }
    }

    /// Path-addressed variant of `begin_edit`. Unknown paths are rejected.
    pub fn begin_edit_path(&mut self, path: &str) -> bool {
        match ProfileField::parse(path) {
            Some(field) if self.profile.is_some() => {
                self.begin_edit(field);
                true
            }
            _ => false,
        }
    }

    pub fn set_edit_buffer(&mut self, text: impl Into<String>) {
        self.editor.set_buffer(text);
    }

    /// Applies the open edit to the local document immediately, then, only
    /// when the document already has a persistent id, dispatches a
    /// best-effort partial update scoped to the changed path. A sync failure
    /// flips the `sync_failed` indicator but never rolls the local value
    /// back and never blocks further edits.
    pub fn commit_edit(&mut self) -> Option<JoinHandle<()>> {
        let profile = self.profile.as_mut()?;
        let (field, value) = self.editor.commit(profile)?;
        let id = profile.id.clone()?;
        Some(self.dispatch_field_sync(id, field, value))
    }

    pub fn discard_edit(&mut self) {
        self.editor.discard();
    }

    /// Accepts a manually entered logo URL (http/https only) and commits it
    /// through the same optimistic path as any other field.
    pub fn set_logo_url(&mut self, url: &str) -> PortResult<Option<JoinHandle<()>>> {
        if !logo::is_valid_logo_url(url) {
            return Err(PortError::Validation(
                "Logo must be an absolute http or https URL".to_string(),
            ));
        }
        let Some(profile) = self.profile.as_mut() else {
            return Err(PortError::Unexpected("no profile loaded".to_string()));
        };
        ProfileField::Logo.set(profile, url.to_string());
        let id = profile.id.clone();
        Ok(id.map(|id| self.dispatch_field_sync(id, ProfileField::Logo, url.to_string())))
    }

    /// Validates and uploads a logo image, then commits the hosted URL.
    /// Type and size rejections happen synchronously, before any network
    /// call.
    pub async fn upload_logo(
        &mut self,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> PortResult<Option<JoinHandle<()>>> {
        if self.uploading {
            return Ok(None);
        }
        if self.profile.is_none() {
            return Err(PortError::Unexpected("no profile loaded".to_string()));
        }
        media::validate_image(mime, bytes.len() as u64, self.state.config.max_upload_mb)?;

        self.uploading = true;
        let uploaded = self.state.images.upload(file_name, mime, bytes).await;
        self.uploading = false;
        let url = uploaded?;

        let Some(profile) = self.profile.as_mut() else {
            return Ok(None);
        };
        ProfileField::Logo.set(profile, url.clone());
        let id = profile.id.clone();
        Ok(id.map(|id| self.dispatch_field_sync(id, ProfileField::Logo, url)))
    }

    fn dispatch_field_sync(
        &self,
        id: String,
        field: ProfileField,
        value: String,
    ) -> JoinHandle<()> {
        let directory = self.state.directory.clone();
        let syncing = self.syncing.clone();
        let sync_failed = self.sync_failed.clone();
        sync_failed.store(false, Ordering::SeqCst);
        syncing.store(true, Ordering::SeqCst);
        tokio::spawn(async move {
            let path = field.path();
            if let Err(e) = directory.update_field(&id, &path, &value).await {
                warn!("field sync failed for '{path}': {e}");
                sync_failed.store(true, Ordering::SeqCst);
            }
            syncing.store(false, Ordering::SeqCst);
        })
    }

    //=====================================================================================
    // Uniqueness review
    //=====================================================================================

    /// Enters the uniqueness screen, generating content on first entry.
    /// Generation never fails outward: each part falls back to its
    /// deterministic default.
    pub async fn advance_to_uniqueness(&mut self) {
        if self.screen != Screen::ProfileReview || self.generating {
            return;
        }
        let Some(profile) = self.profile.clone() else {
            return;
        };
        self.screen = Screen::UniquenessReview;
        if self.uniqueness.is_none() {
            self.generating = true;
            self.uniqueness = Some(self.generator.generate_all(&profile).await);
            self.generating = false;
        }
    }

    pub fn back_to_profile(&mut self) {
        if self.screen == Screen::UniquenessReview {
            self.screen = Screen::ProfileReview;
        }
    }

    /// Regenerates the narrative only, fully replacing the previous one.
    pub async fn regenerate_intro(&mut self) {
        if self.screen != Screen::UniquenessReview || self.generating {
            return;
        }
        let Some(profile) = self.profile.clone() else {
            return;
        };
        self.generating = true;
        let intro = self.generator.generate_intro_only(&profile).await;
        if let Some(content) = self.uniqueness.as_mut() {
            content.intro = intro;
        }
        self.generating = false;
    }

    /// Regenerates the category list only, fully replacing the previous one.
    pub async fn regenerate_categories(&mut self) {
        if self.screen != Screen::UniquenessReview || self.generating {
            return;
        }
        let Some(profile) = self.profile.clone() else {
            return;
        };
        self.generating = true;
        let categories = self.generator.generate_categories_only(&profile).await;
        if let Some(content) = self.uniqueness.as_mut() {
            content.categories = categories;
        }
        self.generating = false;
    }

    /// Edits one piece of the uniqueness content in place.
    pub fn edit_uniqueness_field(&mut self, field: CategoryField, value: String) {
        if self.screen != Screen::UniquenessReview {
            return;
        }
        if let Some(content) = self.uniqueness.as_mut() {
            field.set(content, value);
        }
    }

    //=====================================================================================
    // Differentiator selection and persistence
    //=====================================================================================

    /// Moves on to differentiator selection, folding the reviewed narrative
    /// into the document as its `companyIntro`.
    pub fn advance_to_differentiators(&mut self) {
        if self.screen != Screen::UniquenessReview {
            return;
        }
        if let (Some(profile), Some(content)) = (self.profile.as_mut(), self.uniqueness.as_ref())
        {
            profile.company_intro = content.intro.clone();
        }
        self.screen = Screen::DifferentiatorSelection;
    }

    pub fn back_to_uniqueness(&mut self) {
        if self.screen == Screen::DifferentiatorSelection {
            self.screen = Screen::UniquenessReview;
        }
    }

    pub fn toggle_differentiator(&mut self, differentiator: Differentiator) {
        if self.screen != Screen::DifferentiatorSelection {
            return;
        }
        if let Some(pos) = self.selected.iter().position(|d| *d == differentiator) {
            self.selected.remove(pos);
        } else {
            self.selected.push(differentiator);
        }
    }

    /// The save control is enabled only while at least one differentiator is
    /// selected.
    pub fn can_save(&self) -> bool {
        self.screen == Screen::DifferentiatorSelection
            && !self.selected.is_empty()
            && self.profile.is_some()
            && !self.persisting
    }

    /// Submits the assembled document. On success the backend id is stored
    /// and the dependent onboarding record is initialized; the wizard
    /// reaches `Persisted` only if that second call also succeeds. A
    /// conflict gets its own modal text, everything else the generic one.
    pub async fn save(&mut self) {
        if !self.can_save() {
            return;
        }
        self.persisting = true;

        let directory = self.state.directory.clone();
        let selected = self.selected.clone();
        let Some(profile) = self.profile.as_mut() else {
            self.persisting = false;
            return;
        };

        match directory.create(profile, &selected).await {
            Ok(id) => {
                info!("company profile persisted with id {id}");
                profile.id = Some(id.clone());
                match directory.init_onboarding(&id).await {
                    Ok(()) => {
                        self.screen = Screen::Persisted;
                    }
                    Err(e) => {
                        // Profile is durably created at this point, but the
                        // wizard stays put until onboarding initializes.
                        error!("onboarding initialization failed for {id}: {e}");
                        self.modal = Some(ONBOARDING_INIT_FAILED_MESSAGE.to_string());
                    }
                }
            }
            Err(PortError::Conflict(reason)) => {
                warn!("duplicate company profile: {reason}");
                self.modal = Some(DUPLICATE_SAVE_MESSAGE.to_string());
            }
            Err(e) => {
                error!("saving company profile failed: {e}");
                self.modal = Some(SAVE_FAILED_MESSAGE.to_string());
            }
        }
        self.persisting = false;
    }

    /// Dismisses the error modal, returning its message so the host can
    /// react (e.g. redirect) if it wants to.
    pub fn dismiss_modal(&mut self) -> Option<String> {
        self.modal.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::testing::{
        base_state, CountingImageHost, FailingLogo, FixedLogo, FixedSearch, FixedUniqueness,
        FlakySearch, MockDirectory, RecordingProfileGen,
    };
    use company_profiler_core::{
        domain::{IconKey, MetaTags, PageMap, UniquenessCategory},
        uniqueness::FALLBACK_INTRO,
    };
    use std::sync::atomic::Ordering;

    fn acme_result() -> SearchResult {
        SearchResult {
            title: "Acme Robotics — Official Site".to_string(),
            link: "https://acme-robotics.example".to_string(),
            snippet: "Industrial robot arms and automation cells".to_string(),
            pagemap: Some(PageMap {
                metatags: vec![MetaTags {
                    og_description: Some("Robots that build things".to_string()),
                    og_image: None,
                }],
            }),
        }
    }

    fn acme_profile() -> CompanyProfile {
        let mut profile = CompanyProfile {
            name: "Acme Robotics".to_string(),
            industry: "Robotics".to_string(),
            overview: "Builds industrial robot arms.".to_string(),
            ..Default::default()
        };
        profile.contact.website = "https://acme-robotics.example".to_string();
        profile
    }

    fn wizard_with(
        search: Vec<SearchResult>,
        directory: Arc<MockDirectory>,
    ) -> (WizardController, Arc<RecordingProfileGen>) {
        let profiles = Arc::new(RecordingProfileGen::returning(acme_profile()));
        let mut state = base_state();
        state.search = Arc::new(FixedSearch(search));
        state.profiles = profiles.clone();
        state.directory = directory;
        (
            WizardController::new(state, OwnerIdentity::standalone()),
            profiles,
        )
    }

    async fn drive_to_differentiators(controller: &mut WizardController) {
        controller.search("Acme Robotics").await;
        controller.select_result(0).await;
        controller.advance_to_uniqueness().await;
        controller.advance_to_differentiators();
        assert_eq!(controller.screen(), Screen::DifferentiatorSelection);
    }

    #[tokio::test]
    async fn search_to_persisted_happy_path() {
        let directory = Arc::new(MockDirectory::default());
        let (mut controller, profiles) = wizard_with(vec![acme_result()], directory.clone());

        controller.search("Acme Robotics").await;
        assert_eq!(controller.search_results().len(), 1);
        assert_eq!(
            controller.search_results()[0].title,
            "Acme Robotics — Official Site"
        );

        controller.select_result(0).await;
        assert_eq!(controller.screen(), Screen::ProfileReview);
        // The generated name is used verbatim as the screen header.
        assert_eq!(controller.profile().unwrap().name, "Acme Robotics");
        // The hit list is consumed by generation.
        assert!(controller.search_results().is_empty());

        let info = profiles.seen_info.lock().unwrap();
        assert!(info[0].contains("Acme Robotics — Official Site"));
        assert!(info[0].contains("https://acme-robotics.example"));
        assert!(info[0].contains("Industrial robot arms and automation cells"));
        let owners = profiles.seen_owner.lock().unwrap();
        assert_eq!(owners[0], OwnerIdentity::STANDALONE_USER_ID);
        drop(info);
        drop(owners);

        controller.advance_to_uniqueness().await;
        assert_eq!(controller.screen(), Screen::UniquenessReview);
        assert!(controller.uniqueness().unwrap().categories.len() >= 4);

        controller.advance_to_differentiators();
        assert_eq!(controller.profile().unwrap().company_intro, FALLBACK_INTRO);

        assert!(!controller.can_save());
        controller.toggle_differentiator(Differentiator::FastPayment);
        assert!(controller.can_save());

        controller.save().await;
        assert_eq!(controller.screen(), Screen::Persisted);
        assert_eq!(
            controller.profile().unwrap().id.as_deref(),
            Some(MockDirectory::ASSIGNED_ID)
        );
        assert_eq!(directory.onboarding_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn search_failure_clears_results_and_reports_inline() {
        let mut state = base_state();
        state.search = Arc::new(FlakySearch::new(vec![acme_result()]));
        let mut controller = WizardController::new(state, OwnerIdentity::standalone());

        controller.search("Acme Robotics").await;
        assert_eq!(controller.search_results().len(), 1);
        assert!(controller.search_error().is_none());

        controller.search("Acme Robotics").await;
        assert!(controller.search_results().is_empty());
        assert_eq!(controller.search_error(), Some(SEARCH_FAILED_MESSAGE));
        assert_eq!(controller.screen(), Screen::Search);
    }

    #[tokio::test]
    async fn generation_failure_stays_on_search() {
        let mut state = base_state();
        state.search = Arc::new(FixedSearch(vec![acme_result()]));
        // base_state ships a failing profile generator.
        let mut controller = WizardController::new(state, OwnerIdentity::standalone());

        controller.search("Acme Robotics").await;
        controller.select_result(0).await;
        assert_eq!(controller.screen(), Screen::Search);
        assert!(controller.profile().is_none());
        assert_eq!(controller.search_error(), Some(GENERATION_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn logo_lookup_fills_missing_logo_best_effort() {
        let mut state = base_state();
        state.search = Arc::new(FixedSearch(vec![acme_result()]));
        state.profiles = Arc::new(RecordingProfileGen::returning(acme_profile()));
        state.logos = Arc::new(FixedLogo("https://cdn.example/acme.png".to_string()));
        let mut controller = WizardController::new(state, OwnerIdentity::standalone());

        controller.search("Acme Robotics").await;
        controller.select_result(0).await;
        assert_eq!(
            controller.profile().unwrap().logo,
            "https://cdn.example/acme.png"
        );
    }

    #[tokio::test]
    async fn logo_lookup_failure_leaves_logo_empty() {
        let mut state = base_state();
        state.search = Arc::new(FixedSearch(vec![acme_result()]));
        state.profiles = Arc::new(RecordingProfileGen::returning(acme_profile()));
        state.logos = Arc::new(FailingLogo);
        let mut controller = WizardController::new(state, OwnerIdentity::standalone());

        controller.search("Acme Robotics").await;
        controller.select_result(0).await;
        assert_eq!(controller.screen(), Screen::ProfileReview);
        assert_eq!(controller.profile().unwrap().logo, "");
    }

    #[tokio::test]
    async fn empty_differentiator_set_blocks_save() {
        let directory = Arc::new(MockDirectory::default());
        let (mut controller, _) = wizard_with(vec![acme_result()], directory.clone());
        drive_to_differentiators(&mut controller).await;

        assert!(!controller.can_save());
        controller.save().await;
        assert_eq!(directory.create_calls.load(Ordering::SeqCst), 0);
        assert_eq!(controller.screen(), Screen::DifferentiatorSelection);

        controller.toggle_differentiator(Differentiator::SupportSystem);
        assert!(controller.can_save());
        controller.toggle_differentiator(Differentiator::SupportSystem);
        assert!(!controller.can_save());
    }

    #[tokio::test]
    async fn conflict_and_generic_failures_show_distinct_messages() {
        let conflicting = Arc::new(MockDirectory {
            conflict_on_create: true,
            ..Default::default()
        });
        let (mut controller, _) = wizard_with(vec![acme_result()], conflicting);
        drive_to_differentiators(&mut controller).await;
        controller.toggle_differentiator(Differentiator::FastPayment);
        controller.save().await;
        let conflict_message = controller.modal().unwrap().to_string();
        assert_eq!(conflict_message, DUPLICATE_SAVE_MESSAGE);
        assert_eq!(controller.screen(), Screen::DifferentiatorSelection);

        let failing = Arc::new(MockDirectory {
            fail_create: true,
            ..Default::default()
        });
        let (mut controller, _) = wizard_with(vec![acme_result()], failing);
        drive_to_differentiators(&mut controller).await;
        controller.toggle_differentiator(Differentiator::FastPayment);
        controller.save().await;
        let generic_message = controller.modal().unwrap().to_string();
        assert_eq!(generic_message, SAVE_FAILED_MESSAGE);
        assert_ne!(conflict_message, generic_message);
    }

    #[tokio::test]
    async fn onboarding_failure_blocks_navigation_despite_durable_create() {
        let directory = Arc::new(MockDirectory {
            fail_onboarding: true,
            ..Default::default()
        });
        let (mut controller, _) = wizard_with(vec![acme_result()], directory.clone());
        drive_to_differentiators(&mut controller).await;
        controller.toggle_differentiator(Differentiator::GrowthOpportunities);

        controller.save().await;
        assert_eq!(directory.create_calls.load(Ordering::SeqCst), 1);
        // The create went through and the id is kept...
        assert_eq!(
            controller.profile().unwrap().id.as_deref(),
            Some(MockDirectory::ASSIGNED_ID)
        );
        // ...but the wizard does not move on.
        assert_eq!(controller.screen(), Screen::DifferentiatorSelection);
        assert_eq!(controller.modal(), Some(ONBOARDING_INIT_FAILED_MESSAGE));

        let dismissed = controller.dismiss_modal();
        assert_eq!(dismissed.as_deref(), Some(ONBOARDING_INIT_FAILED_MESSAGE));
        assert!(controller.modal().is_none());
    }

    #[tokio::test]
    async fn commit_without_persistent_id_stays_local() {
        let directory = Arc::new(MockDirectory::default());
        let mut state = base_state();
        state.directory = directory.clone();
        let mut controller =
            WizardController::resume(state, OwnerIdentity::standalone(), acme_profile());

        assert!(controller.begin_edit_path("contact.email"));
        controller.set_edit_buffer("sales@acme-robotics.example");
        let handle = controller.commit_edit();
        assert!(handle.is_none());
        assert_eq!(
            controller.profile().unwrap().contact.email,
            "sales@acme-robotics.example"
        );
        assert!(directory.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn commit_syncs_the_changed_path_when_id_exists() {
        let directory = Arc::new(MockDirectory::default());
        let mut state = base_state();
        state.directory = directory.clone();
        let mut profile = acme_profile();
        profile.id = Some("c-9".to_string());
        let mut controller =
            WizardController::resume(state, OwnerIdentity::standalone(), profile);

        controller.begin_edit(ProfileField::Overview);
        controller.set_edit_buffer("Builds collaborative robot arms.");
        let handle = controller.commit_edit().unwrap();
        handle.await.unwrap();

        let updates = directory.updates.lock().unwrap();
        assert_eq!(
            updates.as_slice(),
            [(
                "c-9".to_string(),
                "overview".to_string(),
                "Builds collaborative robot arms.".to_string()
            )]
        );
        drop(updates);
        assert!(!controller.sync_failed());
    }

    #[tokio::test]
    async fn failed_sync_keeps_local_value_and_raises_indicator() {
        let directory = Arc::new(MockDirectory {
            fail_update: true,
            ..Default::default()
        });
        let mut state = base_state();
        state.directory = directory.clone();
        let mut profile = acme_profile();
        profile.id = Some("c-9".to_string());
        let mut controller =
            WizardController::resume(state, OwnerIdentity::standalone(), profile);

        controller.begin_edit(ProfileField::Mission);
        controller.set_edit_buffer("Automate the boring welds.");
        let handle = controller.commit_edit().unwrap();
        handle.await.unwrap();

        // The optimistic value survives the failed sync.
        assert_eq!(
            controller.profile().unwrap().mission,
            "Automate the boring welds."
        );
        assert!(controller.sync_failed());

        // Further edits are not blocked.
        controller.begin_edit(ProfileField::Founded);
        controller.set_edit_buffer("2009");
        let handle = controller.commit_edit().unwrap();
        handle.await.unwrap();
        assert_eq!(controller.profile().unwrap().founded, "2009");
    }

    #[tokio::test]
    async fn rejected_upload_never_reaches_the_network() {
        let images = Arc::new(CountingImageHost::new("https://img.example/logo.png"));
        let mut state = base_state();
        state.images = images.clone();
        let mut controller =
            WizardController::resume(state, OwnerIdentity::standalone(), acme_profile());

        let err = controller
            .upload_logo("logo.svg", "image/svg+xml", vec![0u8; 64])
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Validation(_)));

        let oversized = vec![0u8; 11 * 1024 * 1024];
        let err = controller
            .upload_logo("logo.png", "image/png", oversized)
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Validation(_)));
        assert_eq!(images.calls.load(Ordering::SeqCst), 0);

        controller
            .upload_logo("logo.png", "image/png", vec![0u8; 64])
            .await
            .unwrap();
        assert_eq!(images.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            controller.profile().unwrap().logo,
            "https://img.example/logo.png"
        );
    }

    #[tokio::test]
    async fn manual_logo_url_is_scheme_checked() {
        let state = base_state();
        let mut controller =
            WizardController::resume(state, OwnerIdentity::standalone(), acme_profile());

        let err = controller.set_logo_url("javascript:alert(1)").unwrap_err();
        assert!(matches!(err, PortError::Validation(_)));
        assert_eq!(controller.profile().unwrap().logo, "");

        controller
            .set_logo_url("https://cdn.acme.example/logo.png")
            .unwrap();
        assert_eq!(
            controller.profile().unwrap().logo,
            "https://cdn.acme.example/logo.png"
        );
    }

    #[tokio::test]
    async fn regeneration_fully_replaces_edited_content() {
        let generated = vec![UniquenessCategory {
            title: "Open Hardware".to_string(),
            icon: IconKey::Zap,
            description: "Everything is published".to_string(),
            score: 5,
            details: vec!["Schematics on request".to_string()],
        }];
        let directory = Arc::new(MockDirectory::default());
        let mut state = base_state();
        state.search = Arc::new(FixedSearch(vec![acme_result()]));
        state.profiles = Arc::new(RecordingProfileGen::returning(acme_profile()));
        state.uniqueness = Arc::new(FixedUniqueness(generated.clone()));
        state.directory = directory;
        let mut controller = WizardController::new(state, OwnerIdentity::standalone());

        controller.search("Acme Robotics").await;
        controller.select_result(0).await;
        controller.advance_to_uniqueness().await;
        assert_eq!(controller.uniqueness().unwrap().categories, generated);

        controller.edit_uniqueness_field(
            company_profiler_core::uniqueness::CategoryField::Title(0),
            "Open Everything".to_string(),
        );
        assert_eq!(
            controller.uniqueness().unwrap().categories[0].title,
            "Open Everything"
        );

        controller.regenerate_categories().await;
        assert_eq!(controller.uniqueness().unwrap().categories, generated);

        // The failing narrative port means intro regeneration lands on the
        // canned fallback, replacing any edit.
        controller.edit_uniqueness_field(
            company_profiler_core::uniqueness::CategoryField::Intro,
            "Hand-written intro".to_string(),
        );
        controller.regenerate_intro().await;
        assert_eq!(controller.uniqueness().unwrap().intro, FALLBACK_INTRO);
    }

    #[tokio::test]
    async fn backward_navigation_discards_nothing() {
        let directory = Arc::new(MockDirectory::default());
        let (mut controller, _) = wizard_with(vec![acme_result()], directory);
        controller.search("Acme Robotics").await;
        controller.select_result(0).await;
        controller.advance_to_uniqueness().await;
        controller.edit_uniqueness_field(
            company_profiler_core::uniqueness::CategoryField::Title(0),
            "Renamed".to_string(),
        );
        controller.advance_to_differentiators();
        controller.toggle_differentiator(Differentiator::ContinuousSupport);

        controller.back_to_uniqueness();
        assert_eq!(controller.screen(), Screen::UniquenessReview);
        controller.back_to_profile();
        assert_eq!(controller.screen(), Screen::ProfileReview);
        assert!(controller.profile().is_some());

        // Re-entering the uniqueness screen does not regenerate.
        controller.advance_to_uniqueness().await;
        assert_eq!(
            controller.uniqueness().unwrap().categories[0].title,
            "Renamed"
        );
        controller.advance_to_differentiators();
        assert_eq!(
            controller.selected_differentiators(),
            [Differentiator::ContinuousSupport]
        );
    }
}
