//! services/wizard/src/adapters/uniqueness_llm.rs
//!
//! This module contains the adapter for the uniqueness-category LLM.
//! It implements the `UniquenessGenerationService` port from the `core` crate.

const SYSTEM_INSTRUCTIONS: &str = r#"You are a partnership analyst. Given a company profile, identify 4 to 6 selling-point categories that make this company uniquely attractive to independent sales partners.

Respond with a JSON object of this exact shape:
{
  "categories": [
    {
      "title": "string (short category name)",
      "icon": "one of: Award, Globe2, DollarSign, TrendingUp, Rocket, Users, ShieldCheck, Zap",
      "description": "string (one sentence)",
      "score": "integer from 1 to 5",
      "details": ["array of 3 to 5 short supporting points"]
    }
  ]
}

Ground every category in the profile you were given. Do not invent financial figures."#;

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
    domain::{CompanyProfile, UniquenessCategory},
    ports::{PortError, PortResult, UniquenessGenerationService},
};
use serde::Deserialize;

#[derive(Deserialize)]
struct CategoriesResponse {
    #[serde(default)]
    categories: Vec<UniquenessCategory>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `UniquenessGenerationService` using an
/// OpenAI-compatible LLM constrained to JSON output.
#[derive(Clone)]
pub struct OpenAiUniquenessAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiUniquenessAdapter {
    /// Creates a new `OpenAiUniquenessAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

//=========================================================================================
// `UniquenessGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl UniquenessGenerationService for OpenAiUniquenessAdapter {
    async fn generate_categories(
        &self,
        profile: &CompanyProfile,
    ) -> PortResult<Vec<UniquenessCategory>> {
        let profile_json = serde_json::to_string(profile)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_INSTRUCTIONS)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(format!("Company profile:\n{profile_json}"))
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .response_format(ResponseFormat::JsonObject)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

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
                PortError::Unexpected("Uniqueness generation returned no content.".to_string())
            })?;

        let parsed: CategoriesResponse = serde_json::from_str(&content)
            .map_err(|e| PortError::Unexpected(format!("Malformed categories JSON: {e}")))?;

        if parsed.categories.is_empty() {
            return Err(PortError::Unexpected(
                "Uniqueness generation returned no categories.".to_string(),
            ));
        }

        // Unknown icon names already fell back to Award during parsing; the
        // score range is enforced here.
        let categories = parsed
            .categories
            .into_iter()
            .map(|mut category| {
                category.score = category.score.clamp(1, 5);
                category
            })
            .collect();

        Ok(categories)
    }
}
