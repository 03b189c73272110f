// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Goldfork pipeline.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter in the plugin registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Embedding,
    Search,
    Calendar,
    Storage,
}

// --- Storage rows ---

/// A conversation session row. Append-only; `updated_at` advances on each turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// ISO 8601 last-activity timestamp.
    pub updated_at: String,
}

/// A single conversation turn. Immutable once stored; append-only per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub session_id: String,
    /// "user" or "assistant".
    pub role: String,
    pub content: String,
    /// Optional structured metadata as a JSON string (e.g. the NLU extraction
    /// or a booking outcome attached to an assistant turn).
    pub metadata: Option<String>,
    /// ISO 8601 timestamp.
    pub created_at: String,
}

/// Status of a durable reservation record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Failed,
}

/// Payload for inserting a new reservation row. The id is assigned by storage.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub session_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub party_size: u32,
    /// ISO 8601 timestamp of the reserved slot, in the restaurant timezone.
    pub reservation_time: String,
    pub special_requests: Option<String>,
    pub status: ReservationStatus,
    /// External calendar reference, real or locally synthesized.
    pub calendar_event_id: Option<String>,
}

/// A durable reservation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub session_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub party_size: u32,
    pub reservation_time: String,
    pub special_requests: Option<String>,
    pub status: ReservationStatus,
    pub calendar_event_id: Option<String>,
    pub created_at: String,
}

// --- NLU extraction and the session draft ---

/// Sparse structured extraction returned by the NLU provider.
///
/// Any subset of fields may be present. `has_complete_info` is the provider's
/// own completeness claim; the slot aggregator re-checks field presence and
/// date resolvability before trusting it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationExtraction {
    #[serde(default)]
    pub has_complete_info: bool,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub party_size: Option<u32>,
    /// Raw natural-language date/time string, unresolved.
    #[serde(default)]
    pub reservation_datetime: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
}

/// Mutable, session-scoped accumulation of reservation slots.
///
/// Built incrementally across turns; never partially persisted. Only a fully
/// resolved draft may be promoted to a [`Reservation`].
#[derive(Debug, Clone, Default)]
pub struct ReservationDraft {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub party_size: Option<u32>,
    /// The natural-language date/time string as supplied by the customer.
    pub requested_datetime_raw: Option<String>,
    /// Timezone-qualified instant produced by the temporal resolver during
    /// completeness evaluation.
    pub requested_datetime_resolved: Option<DateTime<Tz>>,
    pub special_requests: Option<String>,
    /// Set by the slot aggregator once every required slot is present and the
    /// date/time resolves.
    pub is_complete: bool,
}

// --- Availability ---

/// Why a requested slot is (or may not be) bookable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// The requested time falls outside configured operating hours.
    #[strum(serialize = "within_hours")]
    #[serde(rename = "within_hours")]
    WithinHours,
    /// The 2-hour window already holds the maximum number of bookings.
    CapacityExceeded,
    /// The external capacity query itself failed.
    ExternalCheckFailed,
}

/// Transient verdict from the availability checker. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityVerdict {
    pub is_available: bool,
    pub reason: Option<UnavailableReason>,
}

impl AvailabilityVerdict {
    pub fn available() -> Self {
        Self {
            is_available: true,
            reason: None,
        }
    }

    pub fn unavailable(reason: UnavailableReason) -> Self {
        Self {
            is_available: false,
            reason: Some(reason),
        }
    }

    /// Fail-open verdict: the check errored but the slot is treated as
    /// bookable. Callers needing strict semantics must inspect the reason.
    pub fn available_degraded() -> Self {
        Self {
            is_available: true,
            reason: Some(UnavailableReason::ExternalCheckFailed),
        }
    }
}

// --- Booking ---

/// Uniform outcome of one booking orchestrator invocation.
///
/// Carries the customer name and phone so the conversation layer can build a
/// confirmation message without re-reading the draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingOutcome {
    pub success: bool,
    pub message: String,
    pub reservation_id: Option<i64>,
    pub calendar_event_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
}

impl BookingOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            reservation_id: None,
            calendar_event_id: None,
            customer_name: None,
            customer_phone: None,
        }
    }
}

// --- Provider-facing prompt types ---

/// One entry in the prompt sequence sent to the NLU provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// A completion request: bounded conversation history plus optional semantic
/// context. The provider owns the primary system instruction and inserts the
/// context entry immediately after it, before the history.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub history: Vec<ChatMessage>,
    pub context: Option<String>,
}

/// A completion reply: free text plus an optional structured extraction.
#[derive(Debug, Clone, Default)]
pub struct ChatReply {
    pub content: Option<String>,
    pub extraction: Option<ReservationExtraction>,
}

// --- Semantic search ---

/// A ranked text snippet returned by the semantic context service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextSnippet {
    pub text: String,
    pub score: f32,
}

// --- Calendar ---

/// Details for creating a calendar event for a reservation.
#[derive(Debug, Clone)]
pub struct EventDetails {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub party_size: u32,
    pub special_requests: Option<String>,
    /// Start of the dining window.
    pub start: DateTime<Utc>,
    /// Length of the dining window.
    pub window: chrono::Duration,
}
