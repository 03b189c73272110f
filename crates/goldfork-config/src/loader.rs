// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./goldfork.toml` > `~/.config/goldfork/goldfork.toml`
//! > `/etc/goldfork/goldfork.toml` with environment variable overrides via
//! `GOLDFORK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::GoldforkConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/goldfork/goldfork.toml` (system-wide)
/// 3. `~/.config/goldfork/goldfork.toml` (user XDG config)
/// 4. `./goldfork.toml` (local directory)
/// 5. `GOLDFORK_*` environment variables
pub fn load_config() -> Result<GoldforkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GoldforkConfig::default()))
        .merge(Toml::file("/etc/goldfork/goldfork.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("goldfork/goldfork.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("goldfork.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<GoldforkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GoldforkConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<GoldforkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GoldforkConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `GOLDFORK_OPENAI_API_KEY` must map to
/// `openai.api_key`, not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("GOLDFORK_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: GOLDFORK_OPENAI_API_KEY -> "openai_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("qdrant_", "qdrant.", 1)
            .replacen("calendar_", "calendar.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("restaurant_", "restaurant.", 1)
            .replacen("booking_", "booking.", 1)
            .replacen("gateway_", "gateway.", 1);
        mapped.into()
    })
}
