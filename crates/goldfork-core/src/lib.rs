// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Goldfork reservation agent.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Goldfork workspace. All adapter plugins
//! implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::GoldforkError;
pub use types::{AdapterType, HealthStatus, SessionId};

// Re-export all adapter traits at crate root.
pub use traits::{
    CalendarAdapter, EmbeddingAdapter, PluginAdapter, ProviderAdapter, SearchAdapter,
    StorageAdapter,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goldfork_error_has_all_variants() {
        let _config = GoldforkError::Config("test".into());
        let _storage = GoldforkError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _provider = GoldforkError::Provider {
            message: "test".into(),
            source: None,
        };
        let _search = GoldforkError::Search {
            message: "test".into(),
            source: None,
        };
        let _calendar = GoldforkError::Calendar {
            message: "test".into(),
            not_found: false,
            source: None,
        };
        let _validation = GoldforkError::Validation("test".into());
        let _internal = GoldforkError::Internal("test".into());
    }

    #[test]
    fn adapter_type_round_trips() {
        use std::str::FromStr;

        let variants = [
            AdapterType::Provider,
            AdapterType::Embedding,
            AdapterType::Search,
            AdapterType::Calendar,
            AdapterType::Storage,
        ];
        for variant in &variants {
            let s = variant.to_string();
            let parsed = AdapterType::from_str(&s).expect("should parse back");
            assert_eq!(*variant, parsed);
        }
    }

    #[test]
    fn all_trait_modules_are_exported() {
        // Compile-time check that every adapter trait is reachable through
        // the public API.
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_provider_adapter<T: ProviderAdapter>() {}
        fn _assert_embedding_adapter<T: EmbeddingAdapter>() {}
        fn _assert_search_adapter<T: SearchAdapter>() {}
        fn _assert_calendar_adapter<T: CalendarAdapter>() {}
        fn _assert_storage_adapter<T: StorageAdapter>() {}
    }
}
