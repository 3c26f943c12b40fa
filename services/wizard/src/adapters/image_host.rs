//! services/wizard/src/adapters/image_host.rs
//!
//! This module contains the adapter for the hosted image-upload service.
//! It implements the `ImageHostingService` port from the `core` crate.
//!
//! Callers are expected to have pre-validated the file (type and size)
//! through `core::media::validate_image` before reaching this adapter.

use async_trait::async_trait;
use company_profiler_core::ports::{ImageHostingService, PortError, PortResult};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that uploads images to a Cloudinary-style unsigned upload
/// endpoint and returns the hosted URL.
#[derive(Clone)]
pub struct ImageHostAdapter {
    http: reqwest::Client,
    upload_url: String,
    upload_preset: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl ImageHostAdapter {
    /// Creates a new `ImageHostAdapter`.
    pub fn new(http: reqwest::Client, upload_url: String, upload_preset: String) -> Self {
        Self {
            http,
            upload_url,
            upload_preset,
        }
    }
}

//=========================================================================================
// `ImageHostingService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ImageHostingService for ImageHostAdapter {
    async fn upload(&self, file_name: &str, mime: &str, bytes: Vec<u8>) -> PortResult<String> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .http
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .error_for_status()
            .map_err(|_| PortError::Unexpected("Failed to upload image".to_string()))?;

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(parsed.secure_url)
    }
}
