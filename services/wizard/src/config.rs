//! services/wizard/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The
//! `.env` file is used for local development.

use company_profiler_core::domain::OwnerIdentity;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Whether the wizard runs with an externally supplied session identity or
/// with the fixed standalone placeholder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeploymentMode {
    Standalone,
    Hosted,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub log_level: Level,
    pub deployment_mode: DeploymentMode,
    /// Session owner id, required in hosted mode only.
    pub session_user_id: Option<String>,
    pub openai_api_key: Option<String>,
    pub profile_model: String,
    pub uniqueness_model: String,
    pub intro_model: String,
    pub search_api_key: String,
    pub search_engine_id: String,
    /// Base URL of the company backend (persistence + logo lookup).
    pub backend_url: String,
    pub upload_url: String,
    pub upload_preset: String,
    pub max_upload_mb: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for
    /// development, but this is skipped in test environments to ensure tests
    /// are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let mode_str =
            std::env::var("DEPLOYMENT_MODE").unwrap_or_else(|_| "standalone".to_string());
        let deployment_mode = match mode_str.to_lowercase().as_str() {
            "standalone" => DeploymentMode::Standalone,
            "hosted" => DeploymentMode::Hosted,
            other => {
                return Err(ConfigError::InvalidValue(
                    "DEPLOYMENT_MODE".to_string(),
                    format!("'{}' is not a valid deployment mode", other),
                ))
            }
        };
        let session_user_id = std::env::var("SESSION_USER_ID").ok();

        // --- Load Search Settings (required) ---
        let search_api_key = std::env::var("SEARCH_API_KEY")
            .map_err(|_| ConfigError::MissingVar("SEARCH_API_KEY".to_string()))?;
        let search_engine_id = std::env::var("SEARCH_ENGINE_ID")
            .map_err(|_| ConfigError::MissingVar("SEARCH_ENGINE_ID".to_string()))?;

        // --- Load API Keys (as optional) ---
        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();

        // --- Load Adapter-specific Settings ---
        let profile_model =
            std::env::var("PROFILE_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let uniqueness_model =
            std::env::var("UNIQUENESS_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let intro_model =
            std::env::var("INTRO_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let backend_url = std::env::var("BACKEND_URL")
            .unwrap_or_else(|_| "http://localhost:3000/api".to_string());
        let upload_url = std::env::var("UPLOAD_URL")
            .map_err(|_| ConfigError::MissingVar("UPLOAD_URL".to_string()))?;
        let upload_preset =
            std::env::var("UPLOAD_PRESET").unwrap_or_else(|_| "default".to_string());

        let max_upload_mb = match std::env::var("MAX_UPLOAD_MB") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue(
                    "MAX_UPLOAD_MB".to_string(),
                    format!("'{}' is not a size in megabytes", raw),
                )
            })?,
            Err(_) => 10,
        };

        Ok(Self {
            log_level,
            deployment_mode,
            session_user_id,
            openai_api_key,
            profile_model,
            uniqueness_model,
            intro_model,
            search_api_key,
            search_engine_id,
            backend_url,
            upload_url,
            upload_preset,
            max_upload_mb,
        })
    }

    /// Resolves the owner identity exactly once. Standalone mode uses the
    /// fixed placeholder id; hosted mode requires a session user id.
    pub fn owner_identity(&self) -> Result<OwnerIdentity, ConfigError> {
        match self.deployment_mode {
            DeploymentMode::Standalone => Ok(OwnerIdentity::standalone()),
            DeploymentMode::Hosted => self
                .session_user_id
                .clone()
                .filter(|id| !id.is_empty())
                .map(OwnerIdentity::hosted)
                .ok_or_else(|| ConfigError::MissingVar("SESSION_USER_ID".to_string())),
        }
    }
}
