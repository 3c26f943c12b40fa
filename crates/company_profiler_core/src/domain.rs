//! crates/company_profiler_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any transport or presentation layer.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

//=========================================================================================
// CompanyProfile (the central document)
//=========================================================================================

/// The assembled company description document.
///
/// Every nested group (`culture`, `opportunities`, `technology`, `contact`,
/// `socialMedia`) is always present: deserializing partial generator output
/// fills the gaps with empty defaults, so field writes never have to allocate
/// intermediate containers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    /// Owner reference. Attached from the resolved session identity, never
    /// taken from generator output.
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub founded: String,
    #[serde(default)]
    pub headquarters: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub mission: String,
    /// AI-generated "why partner with us" narrative.
    #[serde(default)]
    pub company_intro: String,
    #[serde(default)]
    pub culture: Culture,
    #[serde(default)]
    pub opportunities: Opportunities,
    #[serde(default)]
    pub technology: Technology,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub social_media: SocialMedia,
    /// Assigned by the backend on first save; `None` until then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Culture {
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub work_environment: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Opportunities {
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub growth_potential: String,
    #[serde(default)]
    pub training: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Technology {
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(default)]
    pub innovation: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub website: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SocialMedia {
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub instagram: String,
}

//=========================================================================================
// SearchResult (ephemeral, one per search hit)
//=========================================================================================

/// A single hit from the company search service. Consumed only to seed the
/// generation prompt and the logo candidate list, then discarded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagemap: Option<PageMap>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMap {
    #[serde(default)]
    pub metatags: Vec<MetaTags>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaTags {
    #[serde(default, rename = "og:description", skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
    #[serde(default, rename = "og:image", skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
}

impl SearchResult {
    /// The `og:image` URL from the first metatag block, if any.
    pub fn og_image(&self) -> Option<&str> {
        self.pagemap
            .as_ref()?
            .metatags
            .first()?
            .og_image
            .as_deref()
    }

    pub fn og_description(&self) -> Option<&str> {
        self.pagemap
            .as_ref()?
            .metatags
            .first()?
            .og_description
            .as_deref()
    }

    /// Composes the raw company-info string handed to the profile generator.
    pub fn company_info(&self) -> String {
        format!(
            "Company Name: {}\nWebsite: {}\nDescription: {}\nAdditional Info: {}",
            self.title,
            self.link,
            self.snippet,
            self.og_description().unwrap_or("")
        )
        .trim()
        .to_string()
    }
}

//=========================================================================================
// Uniqueness categories
//=========================================================================================

/// A scored selling-point group shown to the end user. Produced by the
/// uniqueness generator (or the deterministic fallback) and individually
/// editable in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UniquenessCategory {
    pub title: String,
    #[serde(default)]
    pub icon: IconKey,
    pub description: String,
    /// Integer score in 1..=5.
    pub score: u8,
    #[serde(default)]
    pub details: Vec<String>,
}

/// The full output of a uniqueness generation pass: the narrative plus the
/// category list. Regeneration replaces one part or both, never merges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniquenessContent {
    pub intro: String,
    pub categories: Vec<UniquenessCategory>,
}

//=========================================================================================
// Icon keys
//=========================================================================================

/// The enumerated set of icons a category may reference. Generation returns a
/// symbolic name; unknown or future names resolve to the `Award` fallback so
/// they can never break rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IconKey {
    #[default]
    Award,
    Globe2,
    DollarSign,
    TrendingUp,
    Rocket,
    Users,
    ShieldCheck,
    Zap,
}

impl IconKey {
    /// Resolves a symbolic icon name. Unrecognized names fall back to `Award`.
    pub fn parse(name: &str) -> Self {
        match name {
            "Award" => Self::Award,
            "Globe2" => Self::Globe2,
            "DollarSign" => Self::DollarSign,
            "TrendingUp" => Self::TrendingUp,
            "Rocket" => Self::Rocket,
            "Users" => Self::Users,
            "ShieldCheck" => Self::ShieldCheck,
            "Zap" => Self::Zap,
            _ => Self::Award,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Award => "Award",
            Self::Globe2 => "Globe2",
            Self::DollarSign => "DollarSign",
            Self::TrendingUp => "TrendingUp",
            Self::Rocket => "Rocket",
            Self::Users => "Users",
            Self::ShieldCheck => "ShieldCheck",
            Self::Zap => "Zap",
        }
    }
}

impl Serialize for IconKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for IconKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name))
    }
}

//=========================================================================================
// Differentiators
//=========================================================================================

/// One of the four canned partner-benefit tags. The user selects a non-empty
/// subset before the profile can be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Differentiator {
    FastPayment,
    ContinuousSupport,
    GrowthOpportunities,
    SupportSystem,
}

impl Differentiator {
    pub const ALL: [Differentiator; 4] = [
        Self::FastPayment,
        Self::ContinuousSupport,
        Self::GrowthOpportunities,
        Self::SupportSystem,
    ];

    /// The stable wire identifier submitted to the backend.
    pub fn id(&self) -> &'static str {
        match self {
            Self::FastPayment => "fast-payment",
            Self::ContinuousSupport => "continuous-support",
            Self::GrowthOpportunities => "growth-opportunities",
            Self::SupportSystem => "support-system",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.id() == id)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::FastPayment => "Fast Payment",
            Self::ContinuousSupport => "Continuous Support",
            Self::GrowthOpportunities => "Growth Opportunities",
            Self::SupportSystem => "Support System",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::FastPayment => "Quick and reliable payment processing for all partners",
            Self::ContinuousSupport => "24/7 dedicated support system for partners",
            Self::GrowthOpportunities => "Clear career progression and advancement paths",
            Self::SupportSystem => "Robust infrastructure and tools for success",
        }
    }
}

//=========================================================================================
// Session identity
//=========================================================================================

/// The ambient owner identity, resolved exactly once and passed into the
/// controller at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerIdentity {
    user_id: String,
}

impl OwnerIdentity {
    /// The fixed placeholder identifier used when no external session
    /// identity is supplied.
    pub const STANDALONE_USER_ID: &'static str = "681a91212c1ca099fe2b17df";

    pub fn standalone() -> Self {
        Self {
            user_id: Self::STANDALONE_USER_ID.to_string(),
        }
    }

    pub fn hosted(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}
