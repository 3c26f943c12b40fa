//! crates/company_profiler_core/src/fields.rs
//!
//! Typed edit targets for the company profile document.
//!
//! Screens address fields by dot-separated path (`contact.email`,
//! `culture.values.0`). Instead of reflecting over the document at runtime,
//! every addressable field is a variant of [`ProfileField`], so reads and
//! writes go through statically checked accessors while the path-addressed
//! contract is kept via [`ProfileField::parse`] and [`ProfileField::path`].

use crate::domain::CompanyProfile;

//=========================================================================================
// ProfileField (one variant per edit target)
//=========================================================================================

/// An addressable field of the profile document. Index-carrying variants
/// target one element of an array-typed group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Logo,
    Industry,
    Founded,
    Headquarters,
    Overview,
    Mission,
    CompanyIntro,
    CultureWorkEnvironment,
    CultureValue(usize),
    CultureBenefit(usize),
    OpportunityRole(usize),
    OpportunityGrowthPotential,
    OpportunityTraining,
    TechnologyStack(usize),
    TechnologyInnovation,
    ContactEmail,
    ContactPhone,
    ContactAddress,
    ContactWebsite,
    SocialLinkedin,
    SocialTwitter,
    SocialFacebook,
    SocialInstagram,
}

/// How a committed field is rendered when not being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKind {
    /// Plain text; a single interaction begins editing.
    Text,
    /// Rendered as a clickable link (URL or email address); entering edit
    /// mode takes an explicit second interaction so a click can still
    /// navigate.
    Link,
}

impl ProfileField {
    /// Parses a dot-separated field path. Returns `None` for paths that
    /// address nothing in the document.
    pub fn parse(path: &str) -> Option<Self> {
        let mut parts = path.split('.');
        let field = match (parts.next()?, parts.next(), parts.next()) {
            ("name", None, _) => Self::Name,
            ("logo", None, _) => Self::Logo,
            ("industry", None, _) => Self::Industry,
            ("founded", None, _) => Self::Founded,
            ("headquarters", None, _) => Self::Headquarters,
            ("overview", None, _) => Self::Overview,
            ("mission", None, _) => Self::Mission,
            ("companyIntro", None, _) => Self::CompanyIntro,
            ("culture", Some("workEnvironment"), None) => Self::CultureWorkEnvironment,
            ("culture", Some("values"), Some(i)) => Self::CultureValue(i.parse().ok()?),
            ("culture", Some("benefits"), Some(i)) => Self::CultureBenefit(i.parse().ok()?),
            ("opportunities", Some("roles"), Some(i)) => Self::OpportunityRole(i.parse().ok()?),
            ("opportunities", Some("growthPotential"), None) => Self::OpportunityGrowthPotential,
            ("opportunities", Some("training"), None) => Self::OpportunityTraining,
            ("technology", Some("stack"), Some(i)) => Self::TechnologyStack(i.parse().ok()?),
            ("technology", Some("innovation"), None) => Self::TechnologyInnovation,
            ("contact", Some("email"), None) => Self::ContactEmail,
            ("contact", Some("phone"), None) => Self::ContactPhone,
            ("contact", Some("address"), None) => Self::ContactAddress,
            ("contact", Some("website"), None) => Self::ContactWebsite,
            ("socialMedia", Some("linkedin"), None) => Self::SocialLinkedin,
            ("socialMedia", Some("twitter"), None) => Self::SocialTwitter,
            ("socialMedia", Some("facebook"), None) => Self::SocialFacebook,
            ("socialMedia", Some("instagram"), None) => Self::SocialInstagram,
            _ => return None,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(field)
    }

    /// Renders the canonical dot path, used as the scope of partial-update
    /// requests.
    pub fn path(&self) -> String {
        match self {
            Self::Name => "name".to_string(),
            Self::Logo => "logo".to_string(),
            Self::Industry => "industry".to_string(),
            Self::Founded => "founded".to_string(),
            Self::Headquarters => "headquarters".to_string(),
            Self::Overview => "overview".to_string(),
            Self::Mission => "mission".to_string(),
            Self::CompanyIntro => "companyIntro".to_string(),
            Self::CultureWorkEnvironment => "culture.workEnvironment".to_string(),
            Self::CultureValue(i) => format!("culture.values.{i}"),
            Self::CultureBenefit(i) => format!("culture.benefits.{i}"),
            Self::OpportunityRole(i) => format!("opportunities.roles.{i}"),
            Self::OpportunityGrowthPotential => "opportunities.growthPotential".to_string(),
            Self::OpportunityTraining => "opportunities.training".to_string(),
            Self::TechnologyStack(i) => format!("technology.stack.{i}"),
            Self::TechnologyInnovation => "technology.innovation".to_string(),
            Self::ContactEmail => "contact.email".to_string(),
            Self::ContactPhone => "contact.phone".to_string(),
            Self::ContactAddress => "contact.address".to_string(),
            Self::ContactWebsite => "contact.website".to_string(),
            Self::SocialLinkedin => "socialMedia.linkedin".to_string(),
            Self::SocialTwitter => "socialMedia.twitter".to_string(),
            Self::SocialFacebook => "socialMedia.facebook".to_string(),
            Self::SocialInstagram => "socialMedia.instagram".to_string(),
        }
    }

    /// Reads the current value. Array targets past the end of their vector
    /// read as `None`.
    pub fn get<'a>(&self, profile: &'a CompanyProfile) -> Option<&'a str> {
        let value: &str = match self {
            Self::Name => &profile.name,
            Self::Logo => &profile.logo,
            Self::Industry => &profile.industry,
            Self::Founded => &profile.founded,
            Self::Headquarters => &profile.headquarters,
            Self::Overview => &profile.overview,
            Self::Mission => &profile.mission,
            Self::CompanyIntro => &profile.company_intro,
            Self::CultureWorkEnvironment => &profile.culture.work_environment,
            Self::CultureValue(i) => profile.culture.values.get(*i)?,
            Self::CultureBenefit(i) => profile.culture.benefits.get(*i)?,
            Self::OpportunityRole(i) => profile.opportunities.roles.get(*i)?,
            Self::OpportunityGrowthPotential => &profile.opportunities.growth_potential,
            Self::OpportunityTraining => &profile.opportunities.training,
            Self::TechnologyStack(i) => profile.technology.stack.get(*i)?,
            Self::TechnologyInnovation => &profile.technology.innovation,
            Self::ContactEmail => &profile.contact.email,
            Self::ContactPhone => &profile.contact.phone,
            Self::ContactAddress => &profile.contact.address,
            Self::ContactWebsite => &profile.contact.website,
            Self::SocialLinkedin => &profile.social_media.linkedin,
            Self::SocialTwitter => &profile.social_media.twitter,
            Self::SocialFacebook => &profile.social_media.facebook,
            Self::SocialInstagram => &profile.social_media.instagram,
        };
        Some(value)
    }

    /// Writes a value. Array targets grow their vector with empty strings as
    /// needed, so a write never fails.
    pub fn set(&self, profile: &mut CompanyProfile, value: String) {
        fn put(list: &mut Vec<String>, index: usize, value: String) {
            if index >= list.len() {
                list.resize_with(index + 1, String::new);
            }
            list[index] = value;
        }

        match self {
            Self::Name => profile.name = value,
            Self::Logo => profile.logo = value,
            Self::Industry => profile.industry = value,
            Self::Founded => profile.founded = value,
            Self::Headquarters => profile.headquarters = value,
            Self::Overview => profile.overview = value,
            Self::Mission => profile.mission = value,
            Self::CompanyIntro => profile.company_intro = value,
            Self::CultureWorkEnvironment => profile.culture.work_environment = value,
            Self::CultureValue(i) => put(&mut profile.culture.values, *i, value),
            Self::CultureBenefit(i) => put(&mut profile.culture.benefits, *i, value),
            Self::OpportunityRole(i) => put(&mut profile.opportunities.roles, *i, value),
            Self::OpportunityGrowthPotential => profile.opportunities.growth_potential = value,
            Self::OpportunityTraining => profile.opportunities.training = value,
            Self::TechnologyStack(i) => put(&mut profile.technology.stack, *i, value),
            Self::TechnologyInnovation => profile.technology.innovation = value,
            Self::ContactEmail => profile.contact.email = value,
            Self::ContactPhone => profile.contact.phone = value,
            Self::ContactAddress => profile.contact.address = value,
            Self::ContactWebsite => profile.contact.website = value,
            Self::SocialLinkedin => profile.social_media.linkedin = value,
            Self::SocialTwitter => profile.social_media.twitter = value,
            Self::SocialFacebook => profile.social_media.facebook = value,
            Self::SocialInstagram => profile.social_media.instagram = value,
        }
    }

    /// Whether the field uses multi-line (textarea) editing. Fixed allow-list.
    pub fn is_multiline(&self) -> bool {
        matches!(
            self,
            Self::Overview
                | Self::Mission
                | Self::CultureWorkEnvironment
                | Self::OpportunityGrowthPotential
                | Self::OpportunityTraining
                | Self::TechnologyInnovation
        )
    }

    /// URL- and email-valued fields render as clickable links.
    pub fn display_kind(&self) -> DisplayKind {
        match self {
            Self::ContactEmail
            | Self::ContactWebsite
            | Self::SocialLinkedin
            | Self::SocialTwitter
            | Self::SocialFacebook
            | Self::SocialInstagram => DisplayKind::Link,
            _ => DisplayKind::Text,
        }
    }
}

//=========================================================================================
// ProfileEditor (the single in-progress edit buffer)
//=========================================================================================

/// Holds the one field edit that may be in progress at a time. `begin` seeds
/// the buffer from the current value, `commit` applies it, `discard` closes
/// the edit without applying.
#[derive(Debug, Default)]
pub struct ProfileEditor {
    active: Option<ActiveEdit>,
}

#[derive(Debug)]
struct ActiveEdit {
    field: ProfileField,
    buffer: String,
}

impl ProfileEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an edit on `field`, seeding the buffer with the field's current
    /// value. Replaces any edit already in progress.
    pub fn begin(&mut self, field: ProfileField, profile: &CompanyProfile) {
        let buffer = field.get(profile).unwrap_or_default().to_string();
        self.active = Some(ActiveEdit { field, buffer });
    }

    pub fn is_editing(&self) -> bool {
        self.active.is_some()
    }

    pub fn field(&self) -> Option<ProfileField> {
        self.active.as_ref().map(|e| e.field)
    }

    pub fn buffer(&self) -> Option<&str> {
        self.active.as_ref().map(|e| e.buffer.as_str())
    }

    /// Replaces the edit buffer contents. No-op when no edit is open.
    pub fn set_buffer(&mut self, text: impl Into<String>) {
        if let Some(edit) = self.active.as_mut() {
            edit.buffer = text.into();
        }
    }

    /// Applies the buffer to the document and closes the edit. Returns the
    /// field and the committed value so the caller can sync it onward.
    pub fn commit(&mut self, profile: &mut CompanyProfile) -> Option<(ProfileField, String)> {
        let edit = self.active.take()?;
        edit.field.set(profile, edit.buffer.clone());
        Some((edit.field, edit.buffer))
    }

    /// Closes the edit without applying the buffer.
    pub fn discard(&mut self) {
        self.active = None;
    }
}
