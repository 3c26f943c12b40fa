//! crates/company_profiler_core/src/uniqueness.rs
//!
//! Deterministic fallback content for the uniqueness screen, plus the typed
//! edit targets for in-place category editing.

use crate::domain::{IconKey, UniquenessCategory, UniquenessContent};

//=========================================================================================
// Fallback content
//=========================================================================================

/// The canned narrative used when intro generation fails.
pub const FALLBACK_INTRO: &str = "Join a company that values innovation, growth, and success. \
We offer unique opportunities for representatives to thrive in a dynamic market environment.";

fn category(
    title: &str,
    icon: IconKey,
    description: &str,
    score: u8,
    details: &[&str],
) -> UniquenessCategory {
    UniquenessCategory {
        title: title.to_string(),
        icon,
        description: description.to_string(),
        score,
        details: details.iter().map(|d| d.to_string()).collect(),
    }
}

/// The industry-keyed default category set used when generation fails.
///
/// Always starts from the fixed base of four categories; bonus categories are
/// appended on case-insensitive substring matches against the industry
/// string. Each keyword matches independently, so a combined industry like
/// "FinTech" picks up both the tech and the finance bonus.
pub fn fallback_categories(industry: Option<&str>) -> Vec<UniquenessCategory> {
    let mut categories = vec![
        category(
            "Brand Recognition",
            IconKey::Award,
            "Market presence and brand value",
            4,
            &[
                "Established market presence",
                "Strong brand reputation",
                "Recognized industry leader",
                "High customer trust",
            ],
        ),
        category(
            "Geographic Reach",
            IconKey::Globe2,
            "Market coverage and expansion",
            4,
            &[
                "Wide market coverage",
                "Strategic locations",
                "Growing market presence",
                "International opportunities",
            ],
        ),
        category(
            "Financial Benefits",
            IconKey::DollarSign,
            "Compensation and payment structure",
            5,
            &[
                "Competitive commission rates",
                "Fast payment processing",
                "Performance bonuses",
                "Recurring revenue opportunities",
                "Attractive incentive programs",
            ],
        ),
        category(
            "Growth Potential",
            IconKey::TrendingUp,
            "Career and earning opportunities",
            4,
            &[
                "Unlimited earning potential",
                "Career advancement paths",
                "Market expansion plans",
                "Training and development",
            ],
        ),
    ];

    let industry = industry.unwrap_or("").to_lowercase();

    if industry.contains("tech") {
        categories.push(category(
            "Innovation Leadership",
            IconKey::Rocket,
            "Cutting-edge technology and solutions",
            5,
            &[
                "Latest technology products",
                "Innovation-driven culture",
                "High-demand solutions",
                "Competitive advantage through tech",
            ],
        ));
    }

    if industry.contains("healthcare") {
        categories.push(category(
            "Social Impact",
            IconKey::Users,
            "Making a difference in healthcare",
            5,
            &[
                "Improving patient care",
                "Healthcare innovation",
                "Growing healthcare market",
                "Essential services",
            ],
        ));
    }

    if industry.contains("finance") {
        categories.push(category(
            "Market Stability",
            IconKey::ShieldCheck,
            "Secure and stable market position",
            5,
            &[
                "Financial sector stability",
                "Regulatory compliance",
                "Established client base",
                "Recurring revenue model",
            ],
        ));
    }

    categories
}

//=========================================================================================
// In-place category editing
//=========================================================================================

/// An addressable piece of the uniqueness content: the narrative, or one
/// category's title, description, or a single detail line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Intro,
    Title(usize),
    Description(usize),
    Detail(usize, usize),
}

impl CategoryField {
    /// Parses the screen's `{category}.{part}` / `{category}.details.{line}`
    /// addressing, with `intro` for the narrative.
    pub fn parse(path: &str) -> Option<Self> {
        if path == "intro" {
            return Some(Self::Intro);
        }
        let mut parts = path.split('.');
        let index: usize = parts.next()?.parse().ok()?;
        let field = match (parts.next()?, parts.next()) {
            ("title", None) => Self::Title(index),
            ("description", None) => Self::Description(index),
            ("details", Some(line)) => Self::Detail(index, line.parse().ok()?),
            _ => return None,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(field)
    }

    pub fn get<'a>(&self, content: &'a UniquenessContent) -> Option<&'a str> {
        match self {
            Self::Intro => Some(content.intro.as_str()),
            Self::Title(i) => content.categories.get(*i).map(|c| c.title.as_str()),
            Self::Description(i) => content.categories.get(*i).map(|c| c.description.as_str()),
            Self::Detail(i, line) => content
                .categories
                .get(*i)?
                .details
                .get(*line)
                .map(|d| d.as_str()),
        }
    }

    /// Writes a value in place. Targets addressing a missing category or
    /// detail line are ignored.
    pub fn set(&self, content: &mut UniquenessContent, value: String) {
        match self {
            Self::Intro => content.intro = value,
            Self::Title(i) => {
                if let Some(cat) = content.categories.get_mut(*i) {
                    cat.title = value;
                }
            }
            Self::Description(i) => {
                if let Some(cat) = content.categories.get_mut(*i) {
                    cat.description = value;
                }
            }
            Self::Detail(i, line) => {
                if let Some(detail) = content
                    .categories
                    .get_mut(*i)
                    .and_then(|c| c.details.get_mut(*line))
                {
                    *detail = value;
                }
            }
        }
    }

    /// Narrative text, descriptions and detail lines edit as multi-line
    /// text; titles stay single-line.
    pub fn is_multiline(&self) -> bool {
        !matches!(self, Self::Title(_))
    }
}
