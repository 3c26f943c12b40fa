//! services/wizard/src/adapters/profile_llm.rs
//!
//! This module contains the adapter for the profile-generating LLM.
//! It implements the `ProfileGenerationService` port from the `core` crate.

const SYSTEM_INSTRUCTIONS: &str = r#"You are a professional company profiler. Create a detailed company profile in JSON format based on the provided information.
The JSON response must include ALL of the following fields:
{
  "name": "string",
  "industry": "string",
  "founded": "string (year)",
  "headquarters": "string (location)",
  "overview": "string (detailed company description)",
  "mission": "string (company mission statement)",
  "companyIntro": "string (3-4 line partner-facing introduction)",
  "culture": {
    "values": ["array of at least 3 company values"],
    "benefits": ["array of at least 3 company benefits"],
    "workEnvironment": "string (detailed description)"
  },
  "opportunities": {
    "roles": ["array of at least 3 available roles"],
    "growthPotential": "string (detailed growth opportunities)",
    "training": "string (training and development details)"
  },
  "technology": {
    "stack": ["array of at least 3 technologies used"],
    "innovation": "string (innovation approach)"
  },
  "contact": {
    "website": "string (company website)",
    "email": "string (contact email)",
    "phone": "string (contact phone)",
    "address": "string (physical address)"
  },
  "socialMedia": {
    "linkedin": "string (LinkedIn URL)",
    "twitter": "string (Twitter URL)",
    "facebook": "string (optional)",
    "instagram": "string (optional)"
  }
}

If any information is not explicitly provided, make reasonable assumptions based on the company's industry and description."#;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat,
    },
    error::OpenAIError,
    Client,
};
use async_trait::async_trait;
use company_profiler_core::{
    domain::CompanyProfile,
    ports::{PortError, PortResult, ProfileGenerationService},
};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ProfileGenerationService` using an
/// OpenAI-compatible LLM constrained to JSON output.
#[derive(Clone)]
pub struct OpenAiProfileAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiProfileAdapter {
    /// Creates a new `OpenAiProfileAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

//=========================================================================================
// `ProfileGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ProfileGenerationService for OpenAiProfileAdapter {
    /// Generates a full profile document from the composed company-info
    /// string. Deserialization fills any sub-fields the model omitted with
    /// empty defaults, so a sparse response is normalized rather than
    /// rejected.
    async fn generate_profile(
        &self,
        company_info: &str,
        owner_id: &str,
    ) -> PortResult<CompanyProfile> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_INSTRUCTIONS)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(format!(
                    "Generate a JSON company profile for: {company_info}"
                ))
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .response_format(ResponseFormat::JsonObject)
            .temperature(0.7)
            .max_tokens(1500u32)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Unexpected("Profile generation returned no content.".to_string())
            })?;

        let mut profile: CompanyProfile = serde_json::from_str(&content)
            .map_err(|e| PortError::Unexpected(format!("Malformed profile JSON: {e}")))?;

        // The owner comes from the resolved session identity, never from the
        // model, and the document has no persistent id until first save.
        profile.user_id = owner_id.to_string();
        profile.id = None;

        Ok(profile)
    }
}
