// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock semantic search adapter for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use goldfork_core::GoldforkError;
use goldfork_core::traits::adapter::PluginAdapter;
use goldfork_core::traits::search::SearchAdapter;
use goldfork_core::types::{AdapterType, ContextSnippet, HealthStatus};

/// A mock search adapter serving a fixed snippet set.
///
/// `search` returns the configured snippets truncated to `top_k` (empty by
/// default, so `context_for_query` yields `None`). Upserted documents are
/// recorded and counted by their top-level keys.
pub struct MockSearch {
    snippets: Arc<Mutex<Vec<ContextSnippet>>>,
    documents: Arc<Mutex<Vec<serde_json::Value>>>,
    failures: Arc<Mutex<VecDeque<String>>>,
}

impl MockSearch {
    /// Create a new mock search adapter with no indexed snippets.
    pub fn new() -> Self {
        Self {
            snippets: Arc::new(Mutex::new(Vec::new())),
            documents: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Create a mock pre-loaded with snippets.
    pub fn with_snippets(snippets: Vec<ContextSnippet>) -> Self {
        Self {
            snippets: Arc::new(Mutex::new(snippets)),
            documents: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Queue a search failure; the next `search` call returns it.
    pub async fn fail_next_search(&self, message: impl Into<String>) {
        self.failures.lock().await.push_back(message.into());
    }

    /// Replace the served snippet set.
    pub async fn set_snippets(&self, snippets: Vec<ContextSnippet>) {
        *self.snippets.lock().await = snippets;
    }

    /// Documents upserted so far, oldest first.
    pub async fn upserted_documents(&self) -> Vec<serde_json::Value> {
        self.documents.lock().await.clone()
    }
}

impl Default for MockSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockSearch {
    fn name(&self) -> &str {
        "mock-search"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Search
    }

    async fn health_check(&self) -> Result<HealthStatus, GoldforkError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GoldforkError> {
        Ok(())
    }
}

#[async_trait]
impl SearchAdapter for MockSearch {
    async fn search(
        &self,
        _query: &str,
        top_k: usize,
    ) -> Result<Vec<ContextSnippet>, GoldforkError> {
        if let Some(message) = self.failures.lock().await.pop_front() {
            return Err(GoldforkError::Search {
                message,
                source: None,
            });
        }
        let snippets = self.snippets.lock().await;
        Ok(snippets.iter().take(top_k).cloned().collect())
    }

    async fn upsert_document(
        &self,
        document: &serde_json::Value,
    ) -> Result<usize, GoldforkError> {
        let count = document
            .as_object()
            .ok_or_else(|| {
                GoldforkError::Validation("document root must be a JSON object".into())
            })?
            .len();
        self.documents.lock().await.push(document.clone());
        Ok(count)
    }
}
