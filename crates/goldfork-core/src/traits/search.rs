// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search adapter trait for the semantic context service.

use async_trait::async_trait;

use crate::error::GoldforkError;
use crate::traits::adapter::PluginAdapter;
use crate::types::ContextSnippet;

/// Adapter for the external semantic context lookup.
#[async_trait]
pub trait SearchAdapter: PluginAdapter {
    /// Returns the `top_k` most relevant snippets for a query, ranked by score.
    async fn search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ContextSnippet>, GoldforkError>;

    /// Convenience lookup used by the turn controller: top 3 snippets joined
    /// with newline separators, or `None` when nothing relevant is indexed.
    async fn context_for_query(&self, query: &str) -> Result<Option<String>, GoldforkError> {
        let snippets = self.search(query, 3).await?;
        if snippets.is_empty() {
            return Ok(None);
        }
        let joined = snippets
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Ok(Some(joined))
    }

    /// Flattens a structured document into snippets, embeds them, and indexes
    /// them. Returns the number of indexed entries.
    async fn upsert_document(&self, document: &serde_json::Value)
    -> Result<usize, GoldforkError>;
}
