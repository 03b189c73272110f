// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock calendar adapter for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use goldfork_core::GoldforkError;
use goldfork_core::traits::adapter::PluginAdapter;
use goldfork_core::traits::calendar::CalendarAdapter;
use goldfork_core::types::{AdapterType, EventDetails, HealthStatus};

/// Scripted outcome of a mock calendar call.
enum Scripted<T> {
    Ok(T),
    /// Error with the not-found signature when the flag is set.
    Err { not_found: bool },
}

/// A mock calendar with scripted count and create outcomes.
///
/// Outcomes are popped from FIFO queues. When a queue is empty, counting
/// returns 0 and creation returns a fresh `evt-<uuid>` reference. Created
/// events are recorded for assertion.
pub struct MockCalendar {
    counts: Arc<Mutex<VecDeque<Scripted<usize>>>>,
    creates: Arc<Mutex<VecDeque<Scripted<String>>>>,
    created_events: Arc<Mutex<Vec<EventDetails>>>,
}

impl MockCalendar {
    /// Create a new mock calendar with empty queues.
    pub fn new() -> Self {
        Self {
            counts: Arc::new(Mutex::new(VecDeque::new())),
            creates: Arc::new(Mutex::new(VecDeque::new())),
            created_events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful overlap count.
    pub async fn push_count(&self, count: usize) {
        self.counts.lock().await.push_back(Scripted::Ok(count));
    }

    /// Queue a failing overlap count.
    pub async fn fail_next_count(&self) {
        self.counts
            .lock()
            .await
            .push_back(Scripted::Err { not_found: false });
    }

    /// Queue a successful event creation with the given reference.
    pub async fn push_create(&self, event_id: impl Into<String>) {
        self.creates
            .lock()
            .await
            .push_back(Scripted::Ok(event_id.into()));
    }

    /// Queue a failing event creation; `not_found` selects the signature.
    pub async fn fail_next_create(&self, not_found: bool) {
        self.creates
            .lock()
            .await
            .push_back(Scripted::Err { not_found });
    }

    /// Events created so far, oldest first.
    pub async fn created_events(&self) -> Vec<EventDetails> {
        self.created_events.lock().await.clone()
    }
}

impl Default for MockCalendar {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockCalendar {
    fn name(&self) -> &str {
        "mock-calendar"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Calendar
    }

    async fn health_check(&self) -> Result<HealthStatus, GoldforkError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GoldforkError> {
        Ok(())
    }
}

#[async_trait]
impl CalendarAdapter for MockCalendar {
    async fn count_overlapping(
        &self,
        _start: DateTime<Utc>,
        _window: Duration,
    ) -> Result<usize, GoldforkError> {
        match self.counts.lock().await.pop_front() {
            Some(Scripted::Ok(count)) => Ok(count),
            Some(Scripted::Err { not_found }) => Err(GoldforkError::Calendar {
                message: "mock count failure".into(),
                not_found,
                source: None,
            }),
            None => Ok(0),
        }
    }

    async fn create_event(&self, details: &EventDetails) -> Result<String, GoldforkError> {
        self.created_events.lock().await.push(details.clone());

        match self.creates.lock().await.pop_front() {
            Some(Scripted::Ok(id)) => Ok(id),
            Some(Scripted::Err { not_found }) => Err(GoldforkError::Calendar {
                message: "mock create failure".into(),
                not_found,
                source: None,
            }),
            None => Ok(format!("evt-{}", uuid::Uuid::new_v4())),
        }
    }
}
