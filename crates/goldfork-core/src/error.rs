// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Goldfork reservation agent.

use thiserror::Error;

/// The primary error type used across all Goldfork adapter traits and core operations.
#[derive(Debug, Error)]
pub enum GoldforkError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// NLU provider errors (API failure, malformed completion, token limits).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Semantic search errors (collection missing, embedding failure, query failure).
    #[error("search error: {message}")]
    Search {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Calendar service errors. `not_found` marks the "resource not found"
    /// signature that the booking orchestrator's fallback policy dispatches on.
    #[error("calendar error: {message}")]
    Calendar {
        message: String,
        not_found: bool,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Client-facing validation errors (malformed upload, malformed extraction).
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GoldforkError {
    /// Returns true if this is a calendar error carrying the not-found signature.
    pub fn is_calendar_not_found(&self) -> bool {
        matches!(
            self,
            GoldforkError::Calendar {
                not_found: true,
                ..
            }
        )
    }
}
