// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Goldfork plugin architecture.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod calendar;
pub mod embedding;
pub mod provider;
pub mod search;
pub mod storage;

// Re-export all traits at the traits module level for convenience.
pub use adapter::PluginAdapter;
pub use calendar::CalendarAdapter;
pub use embedding::EmbeddingAdapter;
pub use provider::ProviderAdapter;
pub use search::SearchAdapter;
pub use storage::StorageAdapter;
