//! services/wizard/src/adapters/backend.rs
//!
//! This module contains the adapter for the company persistence backend.
//! It implements the `CompanyDirectoryService` port from the `core` crate.

use async_trait::async_trait;
use company_profiler_core::{
    domain::{CompanyProfile, Differentiator},
    ports::{CompanyDirectoryService, PortError, PortResult},
};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter for the REST company backend: create-once persistence,
/// path-scoped partial updates, and the dependent onboarding-progress
/// initialization.
#[derive(Clone)]
pub struct CompanyBackendAdapter {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct CreateResponse {
    id: String,
}

impl CompanyBackendAdapter {
    /// Creates a new `CompanyBackendAdapter`.
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }
}

//=========================================================================================
// `CompanyDirectoryService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CompanyDirectoryService for CompanyBackendAdapter {
    /// Submits the assembled document. A 409 from the backend means a
    /// profile already exists for this owner and maps to
    /// `PortError::Conflict`; everything else non-2xx is a generic persist
    /// failure.
    async fn create(
        &self,
        profile: &CompanyProfile,
        differentiators: &[Differentiator],
    ) -> PortResult<String> {
        let mut body = serde_json::to_value(profile)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        let ids: Vec<&str> = differentiators.iter().map(|d| d.id()).collect();
        body["differentiators"] = json!(ids);

        let response = self
            .http
            .post(format!("{}/companies", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if response.status() == StatusCode::CONFLICT {
            return Err(PortError::Conflict(
                "A company profile already exists for this owner".to_string(),
            ));
        }
        let response = response
            .error_for_status()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let created: CreateResponse = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(created.id)
    }

    /// Partial update scoped to a single changed field path.
    async fn update_field(&self, id: &str, path: &str, value: &str) -> PortResult<()> {
        let response = self
            .http
            .patch(format!("{}/companies/{id}", self.base_url))
            .json(&json!({ path: value }))
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(PortError::NotFound(format!("company {id}")));
        }
        response
            .error_for_status()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(())
    }

    async fn init_onboarding(&self, id: &str) -> PortResult<()> {
        self.http
            .post(format!("{}/companies/{id}/onboarding-progress", self.base_url))
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .error_for_status()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(())
    }
}
