// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Calendar REST API request/response types.

use serde::{Deserialize, Serialize};

/// Body for an event insert.
#[derive(Debug, Clone, Serialize)]
pub struct EventBody {
    /// One-line event title.
    pub summary: String,
    /// Multi-line reservation details.
    pub description: String,
    /// Event start.
    pub start: EventTime,
    /// Event end.
    pub end: EventTime,
    /// Display color hint.
    #[serde(rename = "colorId")]
    pub color_id: String,
    /// Reminder settings.
    pub reminders: EventReminders,
}

/// A timezone-qualified event boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventTime {
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "timeZone")]
    pub time_zone: String,
}

/// Reminder settings for an event.
#[derive(Debug, Clone, Serialize)]
pub struct EventReminders {
    #[serde(rename = "useDefault")]
    pub use_default: bool,
}

/// Response to an event insert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedEvent {
    /// External event identifier.
    pub id: String,
}

/// Response to an events listing.
#[derive(Debug, Clone, Deserialize)]
pub struct EventsListResponse {
    /// Events overlapping the queried window.
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}
