//! crates/company_profiler_core/src/logo.rs
//!
//! Logo candidate construction and the cascading fallback over them.

use url::Url;

use crate::domain::SearchResult;

//=========================================================================================
// Candidate construction
//=========================================================================================

/// Derives the hostname from a page URL. Malformed URLs yield `None` and are
/// simply skipped by the caller, never treated as fatal.
pub fn hostname(link: &str) -> Option<String> {
    let parsed = Url::parse(link).ok()?;
    parsed.host_str().map(|h| h.to_string())
}

/// Accepts only absolute http/https URLs for manually entered logo sources.
pub fn is_valid_logo_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Builds the ordered logo candidate list for a search hit:
/// the explicit `og:image`, then the favicon service keyed by the page's
/// hostname, then the third-party logo lookup keyed by the same hostname.
pub fn logo_candidates(result: &SearchResult) -> Vec<String> {
    let mut sources = Vec::new();

    if let Some(og_image) = result.og_image() {
        sources.push(og_image.to_string());
    }

    if let Some(domain) = hostname(&result.link) {
        sources.push(format!(
            "https://www.google.com/s2/favicons?domain={domain}&sz=64"
        ));
        sources.push(format!("https://logo.clearbit.com/{domain}"));
    }

    sources
}

//=========================================================================================
// LogoResolver (cursor over the candidate list)
//=========================================================================================

/// Walks an ordered candidate list one load-error at a time. The currently
/// displayed source is `current()`; each error advances the cursor; once the
/// list is exhausted the resolver is terminal and a placeholder glyph should
/// be rendered instead. One pass only, no caching.
#[derive(Debug, Clone)]
pub struct LogoResolver {
    sources: Vec<String>,
    cursor: usize,
    exhausted: bool,
}

impl LogoResolver {
    pub fn new(sources: Vec<String>) -> Self {
        let exhausted = sources.is_empty();
        Self {
            sources,
            cursor: 0,
            exhausted,
        }
    }

    pub fn for_result(result: &SearchResult) -> Self {
        Self::new(logo_candidates(result))
    }

    /// The source to render right now, or `None` in the placeholder state.
    pub fn current(&self) -> Option<&str> {
        if self.exhausted {
            return None;
        }
        self.sources.get(self.cursor).map(|s| s.as_str())
    }

    /// Reacts to a load error on the current source by advancing to the next
    /// candidate, or entering the terminal placeholder state when none are
    /// left.
    pub fn advance_on_error(&mut self) {
        if self.exhausted {
            return;
        }
        if self.cursor + 1 < self.sources.len() {
            self.cursor += 1;
        } else {
            self.exhausted = true;
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.exhausted
    }
}
