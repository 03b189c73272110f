// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slot aggregation: folds per-turn NLU extractions into the session draft.
//!
//! Merging is last-write-wins per slot; a later turn may correct an earlier
//! one. A value only lands in the draft if the validator registered for its
//! slot accepts it. Completeness requires every required slot plus a raw
//! date/time that actually resolves.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use goldfork_core::types::{ReservationDraft, ReservationExtraction};
use strum::Display;
use tracing::debug;

/// Smallest bookable party.
pub const MIN_PARTY_SIZE: u32 = 1;
/// Largest bookable party.
pub const MAX_PARTY_SIZE: u32 = 20;

/// Identifies a reservation slot for validator registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SlotField {
    CustomerName,
    CustomerEmail,
    CustomerPhone,
    ReservationDatetime,
    SpecialRequests,
}

/// Per-slot acceptance predicate for string-valued slots.
pub type SlotValidator = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Folds extractions into a session draft and evaluates completeness.
///
/// The default validator map is empty (permissive); deployments register
/// shape checks per slot via [`SlotAggregator::with_validator`]. Party size
/// is always bounds-checked.
pub struct SlotAggregator {
    tz: Tz,
    validators: HashMap<SlotField, SlotValidator>,
}

impl SlotAggregator {
    /// Creates an aggregator resolving date/time text in the given timezone.
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            validators: HashMap::new(),
        }
    }

    /// Registers a validator for a slot, replacing any existing one.
    pub fn with_validator(mut self, field: SlotField, validator: SlotValidator) -> Self {
        self.validators.insert(field, validator);
        self
    }

    /// Merges an extraction into the draft and returns completeness.
    pub fn merge(&self, draft: &mut ReservationDraft, extraction: &ReservationExtraction) -> bool {
        self.merge_at(draft, extraction, Utc::now().with_timezone(&self.tz))
    }

    /// Merges with an explicit reference time for date/time resolution.
    pub fn merge_at(
        &self,
        draft: &mut ReservationDraft,
        extraction: &ReservationExtraction,
        now: DateTime<Tz>,
    ) -> bool {
        self.apply_string(
            SlotField::CustomerName,
            &extraction.customer_name,
            &mut draft.customer_name,
        );
        self.apply_string(
            SlotField::CustomerEmail,
            &extraction.customer_email,
            &mut draft.customer_email,
        );
        self.apply_string(
            SlotField::CustomerPhone,
            &extraction.customer_phone,
            &mut draft.customer_phone,
        );
        self.apply_string(
            SlotField::SpecialRequests,
            &extraction.special_requests,
            &mut draft.special_requests,
        );

        if let Some(size) = extraction.party_size {
            if (MIN_PARTY_SIZE..=MAX_PARTY_SIZE).contains(&size) {
                draft.party_size = Some(size);
            } else {
                debug!(size, "party size out of bounds, keeping previous value");
            }
        }

        if let Some(ref raw) = extraction.reservation_datetime
            && self.accepts(SlotField::ReservationDatetime, raw)
            && draft.requested_datetime_raw.as_deref() != Some(raw.as_str())
        {
            draft.requested_datetime_raw = Some(raw.clone());
            // A new raw string invalidates any previously resolved instant.
            draft.requested_datetime_resolved = None;
        }

        draft.is_complete = self.evaluate(draft, extraction, now);
        draft.is_complete
    }

    /// A draft is complete when the extraction claims completeness, every
    /// required slot is filled, and the raw date/time resolves.
    fn evaluate(
        &self,
        draft: &mut ReservationDraft,
        extraction: &ReservationExtraction,
        now: DateTime<Tz>,
    ) -> bool {
        if !extraction.has_complete_info {
            return false;
        }
        let required_present = draft.customer_name.is_some()
            && draft.customer_email.is_some()
            && draft.customer_phone.is_some()
            && draft.party_size.is_some();
        if !required_present {
            return false;
        }
        let Some(ref raw) = draft.requested_datetime_raw else {
            return false;
        };

        if draft.requested_datetime_resolved.is_none() {
            match goldfork_temporal::resolve(raw, now) {
                Ok(instant) => draft.requested_datetime_resolved = Some(instant),
                Err(e) => {
                    debug!(raw = %raw, error = %e, "date/time did not resolve");
                    return false;
                }
            }
        }
        true
    }

    fn apply_string(&self, field: SlotField, incoming: &Option<String>, target: &mut Option<String>) {
        if let Some(value) = incoming {
            if self.accepts(field, value) {
                *target = Some(value.clone());
            } else {
                debug!(field = %field, "slot value rejected by validator");
            }
        }
    }

    fn accepts(&self, field: SlotField, value: &str) -> bool {
        match self.validators.get(&field) {
            Some(validator) => validator(value),
            None => true,
        }
    }
}

/// Common slot validators.
pub mod validators {
    /// Loose email shape check: one `@` with a dot somewhere after it.
    pub fn email_shape(value: &str) -> bool {
        if value.contains(char::is_whitespace) {
            return false;
        }
        match value.split_once('@') {
            Some((local, domain)) => !local.is_empty() && domain.contains('.'),
            None => false,
        }
    }

    /// Loose phone shape check: at least seven digits, only phone punctuation.
    pub fn phone_shape(value: &str) -> bool {
        let digits = value.chars().filter(char::is_ascii_digit).count();
        let allowed = value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')' | '.'));
        digits >= 7 && allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Karachi;

    fn reference_now() -> DateTime<Tz> {
        // A Wednesday.
        Karachi.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap()
    }

    fn full_extraction() -> ReservationExtraction {
        ReservationExtraction {
            has_complete_info: true,
            customer_name: Some("Jane Doe".into()),
            customer_email: Some("jane@x.com".into()),
            customer_phone: Some("555-123-4567".into()),
            party_size: Some(4),
            reservation_datetime: Some("tomorrow at 7pm".into()),
            special_requests: None,
        }
    }

    #[test]
    fn merge_fills_draft_and_reports_complete() {
        let aggregator = SlotAggregator::new(Karachi);
        let mut draft = ReservationDraft::default();

        let complete = aggregator.merge_at(&mut draft, &full_extraction(), reference_now());
        assert!(complete);
        assert!(draft.is_complete);
        let resolved = draft.requested_datetime_resolved.unwrap();
        assert_eq!(
            resolved,
            Karachi.with_ymd_and_hms(2026, 8, 27, 19, 0, 0).unwrap()
        );
    }

    #[test]
    fn later_values_overwrite_earlier_ones() {
        let aggregator = SlotAggregator::new(Karachi);
        let mut draft = ReservationDraft::default();

        let first = ReservationExtraction {
            party_size: Some(2),
            ..Default::default()
        };
        aggregator.merge_at(&mut draft, &first, reference_now());
        assert_eq!(draft.party_size, Some(2));

        let correction = ReservationExtraction {
            party_size: Some(6),
            ..Default::default()
        };
        aggregator.merge_at(&mut draft, &correction, reference_now());
        assert_eq!(draft.party_size, Some(6));
    }

    #[test]
    fn absent_fields_leave_draft_untouched() {
        let aggregator = SlotAggregator::new(Karachi);
        let mut draft = ReservationDraft::default();
        aggregator.merge_at(&mut draft, &full_extraction(), reference_now());

        let sparse = ReservationExtraction {
            has_complete_info: true,
            party_size: Some(5),
            ..Default::default()
        };
        aggregator.merge_at(&mut draft, &sparse, reference_now());
        assert_eq!(draft.customer_name.as_deref(), Some("Jane Doe"));
        assert_eq!(draft.party_size, Some(5));
    }

    #[test]
    fn incomplete_flag_blocks_completeness() {
        let aggregator = SlotAggregator::new(Karachi);
        let mut draft = ReservationDraft::default();

        let mut extraction = full_extraction();
        extraction.has_complete_info = false;
        let complete = aggregator.merge_at(&mut draft, &extraction, reference_now());
        assert!(!complete);
        // The slots still merged.
        assert_eq!(draft.customer_email.as_deref(), Some("jane@x.com"));
    }

    #[test]
    fn unresolvable_datetime_blocks_completeness() {
        let aggregator = SlotAggregator::new(Karachi);
        let mut draft = ReservationDraft::default();

        let mut extraction = full_extraction();
        extraction.reservation_datetime = Some("whenever works".into());
        let complete = aggregator.merge_at(&mut draft, &extraction, reference_now());
        assert!(!complete);
        assert!(draft.requested_datetime_resolved.is_none());
    }

    #[test]
    fn new_raw_datetime_invalidates_cached_resolution() {
        let aggregator = SlotAggregator::new(Karachi);
        let mut draft = ReservationDraft::default();
        aggregator.merge_at(&mut draft, &full_extraction(), reference_now());
        let first = draft.requested_datetime_resolved.unwrap();

        let mut extraction = full_extraction();
        extraction.reservation_datetime = Some("next friday at 8pm".into());
        aggregator.merge_at(&mut draft, &extraction, reference_now());
        let second = draft.requested_datetime_resolved.unwrap();
        assert_ne!(first, second);
        assert_eq!(
            second,
            Karachi.with_ymd_and_hms(2026, 8, 28, 20, 0, 0).unwrap()
        );
    }

    #[test]
    fn party_size_bounds_are_enforced() {
        let aggregator = SlotAggregator::new(Karachi);
        let mut draft = ReservationDraft::default();

        let zero = ReservationExtraction {
            party_size: Some(0),
            ..Default::default()
        };
        aggregator.merge_at(&mut draft, &zero, reference_now());
        assert!(draft.party_size.is_none());

        let oversized = ReservationExtraction {
            party_size: Some(21),
            ..Default::default()
        };
        aggregator.merge_at(&mut draft, &oversized, reference_now());
        assert!(draft.party_size.is_none());

        let max = ReservationExtraction {
            party_size: Some(20),
            ..Default::default()
        };
        aggregator.merge_at(&mut draft, &max, reference_now());
        assert_eq!(draft.party_size, Some(20));
    }

    #[test]
    fn rejected_value_keeps_previous_one() {
        let aggregator = SlotAggregator::new(Karachi)
            .with_validator(SlotField::CustomerEmail, Box::new(validators::email_shape));
        let mut draft = ReservationDraft::default();

        aggregator.merge_at(&mut draft, &full_extraction(), reference_now());
        assert_eq!(draft.customer_email.as_deref(), Some("jane@x.com"));

        let bogus = ReservationExtraction {
            customer_email: Some("not an email".into()),
            ..Default::default()
        };
        aggregator.merge_at(&mut draft, &bogus, reference_now());
        assert_eq!(draft.customer_email.as_deref(), Some("jane@x.com"));
    }

    #[test]
    fn email_shape_accepts_and_rejects() {
        assert!(validators::email_shape("jane@example.com"));
        assert!(!validators::email_shape("jane@example"));
        assert!(!validators::email_shape("jane example.com"));
        assert!(!validators::email_shape("@example.com"));
    }

    #[test]
    fn phone_shape_accepts_and_rejects() {
        assert!(validators::phone_shape("555-123-4567"));
        assert!(validators::phone_shape("+92 330 5186773"));
        assert!(!validators::phone_shape("555-123"));
        assert!(!validators::phone_shape("call me maybe"));
    }
}
