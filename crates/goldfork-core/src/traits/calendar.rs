// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Calendar adapter trait for the external availability/booking calendar.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::error::GoldforkError;
use crate::traits::adapter::PluginAdapter;
use crate::types::EventDetails;

/// Adapter for the external calendar service.
///
/// Failures from `create_event` may carry the not-found signature
/// ([`GoldforkError::is_calendar_not_found`]); the booking orchestrator
/// treats that case specially per its fallback policy.
#[async_trait]
pub trait CalendarAdapter: PluginAdapter {
    /// Counts existing bookings overlapping the window starting at `start`.
    async fn count_overlapping(
        &self,
        start: DateTime<Utc>,
        window: Duration,
    ) -> Result<usize, GoldforkError>;

    /// Creates a calendar event and returns the external event reference.
    async fn create_event(&self, details: &EventDetails) -> Result<String, GoldforkError>;
}
