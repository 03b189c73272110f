// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding adapter trait for text-to-vector services.

use async_trait::async_trait;

use crate::error::GoldforkError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for embedding services used by the semantic context lookup.
#[async_trait]
pub trait EmbeddingAdapter: PluginAdapter {
    /// Embeds a single text into a dense vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GoldforkError>;
}
