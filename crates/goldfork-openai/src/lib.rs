// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI provider and embedding adapters for the Goldfork reservation agent.
//!
//! [`OpenAiProvider`] implements [`ProviderAdapter`] over the Chat Completions
//! API with the legacy function-calling interface for structured reservation
//! extraction. [`OpenAiEmbedder`] implements [`EmbeddingAdapter`] over the
//! Embeddings API.

pub mod client;
pub mod prompt;
pub mod types;

use async_trait::async_trait;
use chrono::Utc;
use chrono_tz::Tz;
use goldfork_config::model::{GoldforkConfig, RestaurantConfig};
use goldfork_core::error::GoldforkError;
use goldfork_core::traits::{EmbeddingAdapter, PluginAdapter, ProviderAdapter};
use goldfork_core::types::{
    AdapterType, ChatReply, ChatRequest, HealthStatus, ReservationDraft, ReservationExtraction,
};
use tracing::{debug, info, warn};

use crate::client::OpenAiClient;
use crate::types::{
    ApiChatMessage, ChatCompletionRequest, EmbeddingRequest, reservation_extraction_function,
};

/// Name of the extraction function the model is asked to call.
const EXTRACTION_FUNCTION: &str = "extract_reservation_info";

/// OpenAI chat provider implementing [`ProviderAdapter`].
///
/// Owns the primary system instruction (restaurant identity, current date,
/// operating hours) and the structured-extraction schema. API key resolution
/// order: config -> `OPENAI_API_KEY` env var -> error.
pub struct OpenAiProvider {
    client: OpenAiClient,
    model: String,
    restaurant: RestaurantConfig,
    tz: Tz,
    system_prompt_override: Option<String>,
}

impl OpenAiProvider {
    /// Creates a new OpenAI provider from the given configuration.
    pub fn new(config: &GoldforkConfig) -> Result<Self, GoldforkError> {
        let api_key = resolve_api_key(&config.openai.api_key)?;
        let tz = config.restaurant.tz().ok_or_else(|| {
            GoldforkError::Config(format!(
                "unknown restaurant timezone: {}",
                config.restaurant.timezone
            ))
        })?;
        let client = OpenAiClient::new(&api_key, &config.openai.base_url)?;

        info!(model = config.openai.model, "OpenAI provider initialized");

        Ok(Self {
            client,
            model: config.openai.model.clone(),
            restaurant: config.restaurant.clone(),
            tz,
            system_prompt_override: config.agent.system_prompt.clone(),
        })
    }

    /// Assembles the full prompt sequence: primary system instruction first,
    /// semantic context (when present) second, then the conversation history.
    fn assemble_messages(&self, request: &ChatRequest) -> Vec<ApiChatMessage> {
        let system = match &self.system_prompt_override {
            Some(prompt) => prompt.clone(),
            None => prompt::build_system_prompt(&self.restaurant, Utc::now().with_timezone(&self.tz)),
        };

        let mut messages = Vec::with_capacity(request.history.len() + 2);
        messages.push(ApiChatMessage::new("system", system));
        if let Some(ref context) = request.context {
            messages.push(ApiChatMessage::new(
                "system",
                format!("Context from restaurant information: {context}"),
            ));
        }
        for entry in &request.history {
            messages.push(ApiChatMessage::new(&entry.role, &entry.content));
        }
        messages
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, GoldforkError> {
        // Verifying the client is constructable is enough; a real completion
        // would consume tokens on every health probe.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GoldforkError> {
        debug!("OpenAI provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiProvider {
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, GoldforkError> {
        let api_request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: self.assemble_messages(&request),
            temperature: 0.7,
            max_tokens: 500,
            functions: Some(vec![reservation_extraction_function()]),
            function_call: Some("auto".to_string()),
        };

        let response = self.client.chat_completion(&api_request).await?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GoldforkError::Provider {
                message: "completion returned no choices".into(),
                source: None,
            })?;

        let extraction = choice.message.function_call.and_then(|call| {
            if call.name != EXTRACTION_FUNCTION {
                warn!(name = %call.name, "unexpected function call, ignoring");
                return None;
            }
            match serde_json::from_str::<ReservationExtraction>(&call.arguments) {
                Ok(extraction) => Some(extraction),
                Err(e) => {
                    warn!(error = %e, "failed to parse extraction arguments, ignoring");
                    None
                }
            }
        });

        Ok(ChatReply {
            content: choice.message.content,
            extraction,
        })
    }

    async fn generate_confirmation(
        &self,
        draft: &ReservationDraft,
    ) -> Result<String, GoldforkError> {
        let when = match draft.requested_datetime_resolved {
            Some(instant) => instant.format("%B %d, %Y at %-I:%M %p").to_string(),
            None => draft.requested_datetime_raw.clone().unwrap_or_default(),
        };
        let prompt = format!(
            "Generate a warm, professional confirmation message for this reservation:\n\
             Name: {name}\n\
             Party Size: {party} guests\n\
             Date/Time: {when}\n\
             Special Requests: {requests}\n\
             \n\
             Include: confirmation of details, next steps, and contact information.",
            name = draft.customer_name.as_deref().unwrap_or(""),
            party = draft.party_size.unwrap_or(0),
            requests = draft.special_requests.as_deref().unwrap_or("None"),
        );

        let api_request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ApiChatMessage::new(
                    "system",
                    format!(
                        "You are a restaurant reservation assistant at {}.",
                        self.restaurant.name
                    ),
                ),
                ApiChatMessage::new("user", prompt),
            ],
            temperature: 0.7,
            max_tokens: 200,
            functions: None,
            function_call: None,
        };

        let response = self.client.chat_completion(&api_request).await?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GoldforkError::Provider {
                message: "confirmation completion returned no text".into(),
                source: None,
            })
    }
}

/// OpenAI embedding adapter implementing [`EmbeddingAdapter`].
pub struct OpenAiEmbedder {
    client: OpenAiClient,
    model: String,
}

impl OpenAiEmbedder {
    /// Creates a new OpenAI embedder from the given configuration.
    pub fn new(config: &GoldforkConfig) -> Result<Self, GoldforkError> {
        let api_key = resolve_api_key(&config.openai.api_key)?;
        let client = OpenAiClient::new(&api_key, &config.openai.base_url)?;
        Ok(Self {
            client,
            model: config.openai.embedding_model.clone(),
        })
    }
}

#[async_trait]
impl PluginAdapter for OpenAiEmbedder {
    fn name(&self) -> &str {
        "openai-embedding"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Embedding
    }

    async fn health_check(&self) -> Result<HealthStatus, GoldforkError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GoldforkError> {
        debug!("OpenAI embedder shutting down");
        Ok(())
    }
}

#[async_trait]
impl EmbeddingAdapter for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GoldforkError> {
        let response = self
            .client
            .embedding(&EmbeddingRequest {
                model: self.model.clone(),
                input: text.to_string(),
            })
            .await?;
        response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| GoldforkError::Provider {
                message: "embedding response contained no data".into(),
                source: None,
            })
    }
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: &str) -> Result<String, GoldforkError> {
    if !config_key.is_empty() {
        return Ok(config_key.to_string());
    }

    std::env::var("OPENAI_API_KEY").map_err(|_| {
        GoldforkError::Config(
            "OpenAI API key not found. Set openai.api_key in config or OPENAI_API_KEY environment variable.".into(),
        )
    })
}
