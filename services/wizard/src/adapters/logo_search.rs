//! services/wizard/src/adapters/logo_search.rs
//!
//! This module contains the adapter for the backend logo-lookup endpoint.
//! It implements the `LogoSearchService` port from the `core` crate.

use async_trait::async_trait;
use company_profiler_core::ports::{LogoSearchService, PortError, PortResult};
use serde::Deserialize;
use serde_json::json;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that asks the company backend to locate a hosted logo URL for
/// a company name and optional website.
#[derive(Clone)]
pub struct BackendLogoAdapter {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct LogoResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<LogoData>,
}

#[derive(Deserialize)]
struct LogoData {
    #[serde(rename = "logoUrl")]
    logo_url: Option<String>,
}

impl BackendLogoAdapter {
    /// Creates a new `BackendLogoAdapter`.
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }
}

//=========================================================================================
// `LogoSearchService` Trait Implementation
//=========================================================================================

#[async_trait]
impl LogoSearchService for BackendLogoAdapter {
    /// Returns a hosted logo URL when the lookup finds one, `Ok(None)` when
    /// it completes without a match.
    async fn search_logo(
        &self,
        company_name: &str,
        website: Option<&str>,
    ) -> PortResult<Option<String>> {
        let response = self
            .http
            .post(format!("{}/openai/search-logo", self.base_url))
            .json(&json!({
                "companyName": company_name,
                "companyWebsite": website,
            }))
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .error_for_status()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let parsed: LogoResponse = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if !parsed.success {
            return Ok(None);
        }
        Ok(parsed.data.and_then(|d| d.logo_url))
    }
}
