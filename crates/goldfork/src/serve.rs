// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `goldfork serve` command implementation.
//!
//! Wires the configured adapters (OpenAI provider and embedder, Qdrant
//! search, HTTP calendar, SQLite storage) into the booking pipeline and the
//! conversation turn controller, then starts the HTTP/WebSocket gateway.

use std::sync::Arc;

use goldfork_agent::{SessionRegistry, TurnController};
use goldfork_booking::slots::{SlotField, validators};
use goldfork_booking::{AvailabilityChecker, BookingOrchestrator, SlotAggregator};
use goldfork_calendar::HttpCalendar;
use goldfork_config::GoldforkConfig;
use goldfork_core::GoldforkError;
use goldfork_core::traits::{EmbeddingAdapter, StorageAdapter};
use goldfork_openai::{OpenAiEmbedder, OpenAiProvider};
use goldfork_qdrant::QdrantSearch;
use goldfork_storage::SqliteStorage;
use tracing::{error, info, warn};

use crate::gateway::{self, GatewayState};

/// Runs the `goldfork serve` command.
///
/// Initializes every adapter from configuration, assembles the booking
/// pipeline and turn controller, and serves the gateway until shutdown.
pub async fn run_serve(config: GoldforkConfig) -> Result<(), GoldforkError> {
    init_tracing(&config.agent.log_level);

    info!("starting goldfork serve");

    let tz = config.restaurant.tz().ok_or_else(|| {
        GoldforkError::Config(format!(
            "invalid restaurant timezone: {}",
            config.restaurant.timezone
        ))
    })?;

    // Storage first: everything downstream persists through it.
    let storage = {
        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await?;
        Arc::new(storage)
    };

    let provider = {
        let provider = OpenAiProvider::new(&config).map_err(|e| {
            error!(error = %e, "failed to initialize OpenAI provider");
            eprintln!(
                "error: OpenAI API key required. Set via config or the OPENAI_API_KEY env var."
            );
            e
        })?;
        Arc::new(provider)
    };

    let embedder: Arc<dyn EmbeddingAdapter> = Arc::new(OpenAiEmbedder::new(&config)?);
    let search = Arc::new(QdrantSearch::new(&config.qdrant, embedder)?);
    if let Err(e) = search.ensure_ready().await {
        // Context lookups degrade per turn; the server still starts.
        warn!(error = %e, "qdrant collection check failed, context lookups may fail");
    }

    let calendar = Arc::new(HttpCalendar::new(&config.calendar, tz)?);

    let checker = AvailabilityChecker::new(
        config.restaurant.hours.clone(),
        config.booking.clone(),
        calendar.clone(),
    );
    let orchestrator = BookingOrchestrator::new(
        checker,
        calendar,
        storage.clone(),
        config.booking.clone(),
    );
    let aggregator = SlotAggregator::new(tz)
        .with_validator(SlotField::CustomerEmail, Box::new(validators::email_shape))
        .with_validator(SlotField::CustomerPhone, Box::new(validators::phone_shape));

    let registry = Arc::new(SessionRegistry::new());
    let controller = Arc::new(TurnController::new(
        storage.clone(),
        provider,
        search.clone(),
        aggregator,
        orchestrator,
        registry.clone(),
    ));

    let state = GatewayState::new(
        controller,
        registry,
        search,
        config.restaurant.name.clone(),
        tz,
    );

    let result = gateway::start_server(&config.gateway, state).await;

    if let Err(e) = storage.close().await {
        warn!(error = %e, "storage close failed during shutdown");
    }
    result
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("goldfork={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
