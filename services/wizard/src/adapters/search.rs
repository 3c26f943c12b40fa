//! services/wizard/src/adapters/search.rs
//!
//! This module contains the adapter for the hosted company search API.
//! It implements the `CompanySearchService` port from the `core` crate.

use async_trait::async_trait;
use company_profiler_core::{
    domain::SearchResult,
    ports::{CompanySearchService, PortError, PortResult},
};
use serde::Deserialize;

const SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
const RESULTS_PER_QUERY: u32 = 10;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `CompanySearchService` against the Google
/// Custom Search API.
#[derive(Clone)]
pub struct WebSearchAdapter {
    http: reqwest::Client,
    api_key: String,
    engine_id: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

impl WebSearchAdapter {
    /// Creates a new `WebSearchAdapter`.
    pub fn new(http: reqwest::Client, api_key: String, engine_id: String) -> Self {
        Self {
            http,
            api_key,
            engine_id,
        }
    }
}

//=========================================================================================
// `CompanySearchService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CompanySearchService for WebSearchAdapter {
    /// Runs the query and returns the raw hit list. Any non-2xx response is
    /// reported as a generic search failure.
    async fn search(&self, query: &str) -> PortResult<Vec<SearchResult>> {
        let num = RESULTS_PER_QUERY.to_string();
        let response = self
            .http
            .get(SEARCH_ENDPOINT)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .error_for_status()
            .map_err(|_| PortError::Unexpected("Failed to fetch search results".to_string()))?;

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(parsed.items)
    }
}
