// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for NLU/chat service integrations.

use async_trait::async_trait;

use crate::error::GoldforkError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ChatReply, ChatRequest, ReservationDraft};

/// Adapter for the external NLU/chat capability.
///
/// The provider owns the primary system instruction (restaurant identity,
/// current date, operating hours) and the structured-extraction schema. The
/// caller supplies conversation history and optional semantic context; the
/// context entry is placed immediately after the system instruction, before
/// the history.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends a completion request and returns the reply text plus an optional
    /// structured reservation extraction.
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, GoldforkError>;

    /// Generates a natural-language confirmation message for a booked
    /// reservation from the completed draft.
    async fn generate_confirmation(
        &self,
        draft: &ReservationDraft,
    ) -> Result<String, GoldforkError>;
}
