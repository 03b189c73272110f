// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation turn controller: one customer utterance in, one
//! assistant turn out.
//!
//! Every turn follows the same sequence: persist the user message, load
//! bounded history, fetch semantic context, call the NLU provider, fold any
//! extraction into the session draft, and book once the draft is complete.
//! Every branch terminates with an assistant turn; unhandled failures
//! degrade to a fixed apology so internal detail never reaches the customer.

use std::sync::Arc;

use chrono::Utc;
use goldfork_booking::{BookingOrchestrator, SlotAggregator};
use goldfork_core::GoldforkError;
use goldfork_core::traits::{ProviderAdapter, SearchAdapter, StorageAdapter};
use goldfork_core::types::{ChatMessage, ChatRequest, Message, Session};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::registry::SessionRegistry;

/// How many recent messages are replayed to the provider each turn.
pub const HISTORY_LIMIT: i64 = 10;

/// Fixed utterance returned when a turn fails for any unhandled reason.
pub const APOLOGY: &str =
    "I apologize, but I'm having trouble processing your request. Please try again.";

/// The assistant's side of one completed turn.
///
/// `metadata` is a JSON string (the NLU extraction, or the booking outcome
/// when a booking was attempted) and is stored verbatim on the persisted
/// message.
#[derive(Debug, Clone)]
pub struct AssistantTurn {
    pub content: String,
    pub metadata: Option<String>,
}

/// Drives the per-turn conversation pipeline.
pub struct TurnController {
    storage: Arc<dyn StorageAdapter>,
    provider: Arc<dyn ProviderAdapter>,
    search: Arc<dyn SearchAdapter>,
    aggregator: SlotAggregator,
    orchestrator: BookingOrchestrator,
    registry: Arc<SessionRegistry>,
}

impl TurnController {
    pub fn new(
        storage: Arc<dyn StorageAdapter>,
        provider: Arc<dyn ProviderAdapter>,
        search: Arc<dyn SearchAdapter>,
        aggregator: SlotAggregator,
        orchestrator: BookingOrchestrator,
        registry: Arc<SessionRegistry>,
    ) -> Self {
        Self {
            storage,
            provider,
            search,
            aggregator,
            orchestrator,
            registry,
        }
    }

    /// The draft registry this controller reads and writes.
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Processes one customer utterance and returns the assistant turn.
    ///
    /// Infallible by design: pipeline errors degrade to the apology
    /// utterance, and the assistant turn is persisted best-effort so the
    /// reply still reaches the customer when the store is down.
    pub async fn process_turn(&self, session_id: &str, text: &str) -> AssistantTurn {
        let turn = match self.run_turn(session_id, text).await {
            Ok(turn) => turn,
            Err(e) => {
                warn!(session_id, error = %e, "turn failed, degrading to apology");
                AssistantTurn {
                    content: APOLOGY.to_string(),
                    metadata: None,
                }
            }
        };

        if let Err(e) = self
            .append_turn(session_id, "assistant", &turn.content, turn.metadata.clone())
            .await
        {
            warn!(session_id, error = %e, "failed to persist assistant turn");
        }
        if let Err(e) = self.storage.touch_session(session_id).await {
            warn!(session_id, error = %e, "failed to touch session");
        }
        turn
    }

    async fn run_turn(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<AssistantTurn, GoldforkError> {
        self.ensure_session(session_id).await?;

        // The user message lands first so history never loses it, whatever
        // happens downstream.
        self.append_turn(session_id, "user", text, None).await?;

        let history = self
            .storage
            .get_recent_messages(session_id, HISTORY_LIMIT)
            .await?
            .into_iter()
            .map(|m| ChatMessage::new(m.role, m.content))
            .collect();

        // Context enriches the prompt but is never worth failing the turn.
        let context = match self.search.context_for_query(text).await {
            Ok(context) => context,
            Err(e) => {
                warn!(session_id, error = %e, "context lookup failed, continuing without");
                None
            }
        };

        let reply = self.provider.complete(ChatRequest { history, context }).await?;
        let mut content = reply.content.unwrap_or_default();
        let mut metadata = None;

        if let Some(extraction) = reply.extraction {
            metadata = Some(to_metadata(&extraction)?);

            let mut draft = self.registry.draft(session_id);
            let complete = self.aggregator.merge(&mut draft, &extraction);
            self.registry.store_draft(session_id, draft.clone());
            debug!(session_id, complete, "extraction merged into draft");

            if complete {
                let outcome = self.orchestrator.book(session_id, &draft).await;
                if outcome.success {
                    info!(
                        session_id,
                        reservation_id = outcome.reservation_id,
                        "reservation booked"
                    );
                    content = match self.provider.generate_confirmation(&draft).await {
                        Ok(text) => text,
                        Err(e) => {
                            warn!(session_id, error = %e, "confirmation generation failed");
                            outcome.message.clone()
                        }
                    };
                    // A fresh draft for any follow-up reservation.
                    self.registry.clear_draft(session_id);
                } else {
                    content = outcome.message.clone();
                }
                metadata = Some(to_metadata(&outcome)?);
            }
        }

        Ok(AssistantTurn { content, metadata })
    }

    async fn ensure_session(&self, session_id: &str) -> Result<(), GoldforkError> {
        if self.storage.get_session(session_id).await?.is_some() {
            return Ok(());
        }
        let now = Utc::now().to_rfc3339();
        let session = Session {
            id: session_id.to_string(),
            created_at: now.clone(),
            updated_at: now,
        };
        info!(session_id, "creating session");
        self.storage.create_session(&session).await
    }

    async fn append_turn(
        &self,
        session_id: &str,
        role: &str,
        content: &str,
        metadata: Option<String>,
    ) -> Result<(), GoldforkError> {
        let message = Message {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            role: role.to_string(),
            content: content.to_string(),
            metadata,
            created_at: Utc::now().to_rfc3339(),
        };
        self.storage.insert_message(&message).await
    }
}

fn to_metadata<T: serde::Serialize>(value: &T) -> Result<String, GoldforkError> {
    serde_json::to_string(value)
        .map_err(|e| GoldforkError::Internal(format!("serializing turn metadata: {e}")))
}
