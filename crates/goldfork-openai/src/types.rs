// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI Chat Completions and Embeddings request/response types.

use serde::{Deserialize, Serialize};

// --- Chat completion request types ---

/// A request to the Chat Completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier (e.g., "gpt-4o-mini").
    pub model: String,

    /// Conversation messages, system prompt first.
    pub messages: Vec<ApiChatMessage>,

    /// Sampling temperature.
    pub temperature: f32,

    /// Maximum tokens to generate.
    pub max_tokens: u32,

    /// Legacy function definitions offered to the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<FunctionDefinition>>,

    /// Function-call mode ("auto" leaves invocation to the model).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<String>,
}

/// A single message in the Chat Completions conversation format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiChatMessage {
    /// Role: "system", "user", or "assistant".
    pub role: String,

    /// Message text.
    pub content: String,
}

impl ApiChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// A function definition for the legacy function-calling API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Function name (unique identifier).
    pub name: String,
    /// Human-readable description of what the function extracts.
    pub description: String,
    /// JSON Schema describing the function's parameters.
    pub parameters: serde_json::Value,
}

/// The reservation-slot extraction function offered on every completion.
///
/// All properties are optional; the model fills what the conversation has
/// established so far and sets `has_complete_info` when every required slot
/// is present.
pub fn reservation_extraction_function() -> FunctionDefinition {
    FunctionDefinition {
        name: "extract_reservation_info".to_string(),
        description: "Extract reservation information from the conversation".to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "has_complete_info": {
                    "type": "boolean",
                    "description": "Whether all required information is collected"
                },
                "customer_name": {"type": "string"},
                "customer_email": {"type": "string"},
                "customer_phone": {"type": "string"},
                "party_size": {"type": "integer"},
                "reservation_datetime": {"type": "string"},
                "special_requests": {"type": "string"}
            }
        }),
    }
}

// --- Chat completion response types ---

/// A full response from the Chat Completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Completion choices; the first is used.
    pub choices: Vec<CompletionChoice>,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    /// The generated message.
    pub message: ResponseMessage,
}

/// The assistant message within a completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Reply text; null when the model only emitted a function call.
    #[serde(default)]
    pub content: Option<String>,

    /// Function invocation requested by the model.
    #[serde(default)]
    pub function_call: Option<FunctionCallData>,
}

/// A function call emitted by the model.
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionCallData {
    /// Name of the invoked function.
    pub name: String,
    /// JSON-encoded arguments string.
    pub arguments: String,
}

// --- Embedding types ---

/// A request to the Embeddings endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingRequest {
    /// Embedding model identifier.
    pub model: String,
    /// Text to embed.
    pub input: String,
}

/// A full response from the Embeddings endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingResponse {
    /// Embedding results; one per input.
    pub data: Vec<EmbeddingData>,
}

/// One embedding result.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingData {
    /// The dense vector.
    pub embedding: Vec<f32>,
}

// --- Error types ---

/// API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Error details.
    pub error: ApiErrorDetail,
}

/// Error detail within an API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    /// Error type identifier.
    #[serde(rename = "type")]
    #[serde(default)]
    pub type_: Option<String>,
    /// Human-readable error message.
    pub message: String,
}
