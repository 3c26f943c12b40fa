//! services/wizard/src/adapters/intro_llm.rs
//!
//! This module contains the adapter for the narrative-generating LLM.
//! It implements the `NarrativeGenerationService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    error::OpenAIError,
    Client,
};
use async_trait::async_trait;
use company_profiler_core::{
    domain::CompanyProfile,
    ports::{NarrativeGenerationService, PortError, PortResult},
};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `NarrativeGenerationService` using an
/// OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiIntroAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiIntroAdapter {
    /// Creates a new `OpenAiIntroAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

//=========================================================================================
// `NarrativeGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl NarrativeGenerationService for OpenAiIntroAdapter {
    /// Generates the short partner-facing narrative for the uniqueness
    /// screen.
    async fn generate_intro(&self, profile: &CompanyProfile) -> PortResult<String> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(
                    "You write short company introductions for a partnership marketplace. \
                     Given a company profile, write a warm, confident 'Why partner with us?' \
                     paragraph of 3 to 4 lines of plain text. No headings, no bullet points, \
                     no quotes.",
                )
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(format!(
                    "Company: {}\nIndustry: {}\nOverview: {}\nMission: {}",
                    profile.name, profile.industry, profile.overview, profile.mission
                ))
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(200u32)
            .temperature(0.7)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        let intro = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Unexpected("Intro generation returned no content.".to_string())
            })?;

        Ok(intro.trim().to_string())
    }
}
