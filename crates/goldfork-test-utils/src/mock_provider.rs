// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock NLU provider adapter for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with pre-configured replies,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use goldfork_core::GoldforkError;
use goldfork_core::traits::adapter::PluginAdapter;
use goldfork_core::traits::provider::ProviderAdapter;
use goldfork_core::types::{AdapterType, ChatReply, ChatRequest, HealthStatus, ReservationDraft};

/// A mock NLU provider that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue; a queued `Err` simulates a provider
/// failure. When the queue is empty, a default reply is returned. Every
/// incoming request is recorded for assertion.
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<Result<ChatReply, String>>>>,
    confirmations: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with empty queues.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            confirmations: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful reply.
    pub async fn push_reply(&self, reply: ChatReply) {
        self.replies.lock().await.push_back(Ok(reply));
    }

    /// Queue a completion failure.
    pub async fn fail_next_complete(&self, message: impl Into<String>) {
        self.replies.lock().await.push_back(Err(message.into()));
    }

    /// Queue a confirmation message.
    pub async fn push_confirmation(&self, text: impl Into<String>) {
        self.confirmations.lock().await.push_back(text.into());
    }

    /// Requests recorded so far, oldest first.
    pub async fn recorded_requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, GoldforkError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GoldforkError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, GoldforkError> {
        self.requests.lock().await.push(request);

        match self.replies.lock().await.pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(GoldforkError::Provider {
                message,
                source: None,
            }),
            None => Ok(ChatReply {
                content: Some("mock reply".to_string()),
                extraction: None,
            }),
        }
    }

    async fn generate_confirmation(
        &self,
        draft: &ReservationDraft,
    ) -> Result<String, GoldforkError> {
        match self.confirmations.lock().await.pop_front() {
            Some(text) => Ok(text),
            None => Ok(format!(
                "Your reservation is confirmed, {}!",
                draft.customer_name.as_deref().unwrap_or("guest")
            )),
        }
    }
}
