// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait implemented by every adapter in the Goldfork plugin registry.

use async_trait::async_trait;

use crate::error::GoldforkError;
use crate::types::{AdapterType, HealthStatus};

/// Base trait for all adapters (providers, storage, calendar, search).
///
/// Gives every adapter a stable identity for logging and diagnostics plus a
/// uniform health-check and shutdown surface.
#[async_trait]
pub trait PluginAdapter: Send + Sync {
    /// Short stable name of the adapter (e.g. "sqlite", "openai").
    fn name(&self) -> &str;

    /// Adapter implementation version.
    fn version(&self) -> semver::Version;

    /// Which slot of the registry this adapter fills.
    fn adapter_type(&self) -> AdapterType;

    /// Probe the adapter's backing service.
    async fn health_check(&self) -> Result<HealthStatus, GoldforkError>;

    /// Release resources and flush pending work.
    async fn shutdown(&self) -> Result<(), GoldforkError> {
        Ok(())
    }
}
