// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Booking orchestration: availability check, calendar write, durable write.
//!
//! The durable write always comes last, so a failed pipeline never leaves a
//! reservation row behind. The pipeline is not idempotent: retrying a turn
//! that already booked creates a second reservation.

use std::sync::Arc;

use chrono::Duration;
use goldfork_config::model::BookingConfig;
use goldfork_core::traits::{CalendarAdapter, StorageAdapter};
use goldfork_core::types::{BookingOutcome, EventDetails, NewReservation, ReservationDraft,
    ReservationStatus};
use strum::Display;
use tracing::{info, warn};

use crate::availability::AvailabilityChecker;

/// Pipeline stage, traced as each booking progresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
enum BookingStage {
    CheckingAvailability,
    WritingCalendar,
    WritingRecord,
    Done,
}

/// Drives a complete draft through the booking pipeline.
pub struct BookingOrchestrator {
    checker: AvailabilityChecker,
    calendar: Arc<dyn CalendarAdapter>,
    storage: Arc<dyn StorageAdapter>,
    policy: BookingConfig,
}

impl BookingOrchestrator {
    pub fn new(
        checker: AvailabilityChecker,
        calendar: Arc<dyn CalendarAdapter>,
        storage: Arc<dyn StorageAdapter>,
        policy: BookingConfig,
    ) -> Self {
        Self {
            checker,
            calendar,
            storage,
            policy,
        }
    }

    /// Books the draft for the session, returning the outcome in every case.
    ///
    /// Failures are outcomes, not errors: the caller relays `message` to the
    /// customer and never sees internal detail.
    pub async fn book(&self, session_id: &str, draft: &ReservationDraft) -> BookingOutcome {
        let (Some(instant), Some(name), Some(email), Some(phone), Some(party_size)) = (
            draft.requested_datetime_resolved,
            draft.customer_name.as_deref(),
            draft.customer_email.as_deref(),
            draft.customer_phone.as_deref(),
            draft.party_size,
        ) else {
            warn!(session_id, "booking attempted with incomplete draft");
            return BookingOutcome::failure("The reservation details are incomplete.");
        };

        info!(session_id, stage = %BookingStage::CheckingAvailability, %instant, party_size, "booking");
        let verdict = self.checker.check(instant, party_size).await;
        if !verdict.is_available {
            info!(session_id, reason = ?verdict.reason, "slot not available");
            return BookingOutcome::failure("The requested time slot is not available.");
        }

        info!(session_id, stage = %BookingStage::WritingCalendar, "booking");
        let details = EventDetails {
            customer_name: name.to_string(),
            customer_email: email.to_string(),
            customer_phone: phone.to_string(),
            party_size,
            special_requests: draft.special_requests.clone(),
            start: instant.with_timezone(&chrono::Utc),
            window: Duration::hours(self.policy.window_hours),
        };
        let event_id = match self.calendar.create_event(&details).await {
            Ok(id) => id,
            Err(e) if e.is_calendar_not_found() && self.policy.fallback_on_calendar_not_found => {
                // The reservation still lands durably; the synthesized
                // reference marks it as calendar-less.
                let local = format!("local_{}", uuid::Uuid::new_v4());
                warn!(session_id, error = %e, reference = %local, "calendar missing, using local reference");
                local
            }
            Err(e) => {
                warn!(session_id, error = %e, "calendar write failed");
                return BookingOutcome::failure("Failed to create calendar event.");
            }
        };

        info!(session_id, stage = %BookingStage::WritingRecord, "booking");
        let row = NewReservation {
            session_id: session_id.to_string(),
            customer_name: name.to_string(),
            customer_email: email.to_string(),
            customer_phone: phone.to_string(),
            party_size,
            reservation_time: instant.to_rfc3339(),
            special_requests: draft.special_requests.clone(),
            status: ReservationStatus::Confirmed,
            calendar_event_id: Some(event_id.clone()),
        };
        let reservation_id = match self.storage.insert_reservation(&row).await {
            Ok(id) => id,
            Err(e) => {
                warn!(session_id, error = %e, "reservation write failed");
                return BookingOutcome::failure("Error processing the reservation.");
            }
        };

        info!(session_id, stage = %BookingStage::Done, reservation_id, event_id = %event_id, "booking");
        BookingOutcome {
            success: true,
            message: "Reservation confirmed!".to_string(),
            reservation_id: Some(reservation_id),
            calendar_event_id: Some(event_id),
            customer_name: Some(name.to_string()),
            customer_phone: Some(phone.to_string()),
        }
    }
}
