// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Availability checking: operating hours plus calendar capacity.
//!
//! A conflict is data, not an error: the checker always returns a verdict.
//! When the external capacity query fails, the configured policy decides
//! between fail-open (available, degraded) and fail-closed.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration};
use chrono_tz::Tz;
use goldfork_config::model::{BookingConfig, WeekHours};
use goldfork_core::traits::CalendarAdapter;
use goldfork_core::types::{AvailabilityVerdict, UnavailableReason};
use tracing::{debug, warn};

/// Checks whether a resolved reservation instant is bookable.
pub struct AvailabilityChecker {
    hours: WeekHours,
    policy: BookingConfig,
    calendar: Arc<dyn CalendarAdapter>,
}

impl AvailabilityChecker {
    pub fn new(hours: WeekHours, policy: BookingConfig, calendar: Arc<dyn CalendarAdapter>) -> Self {
        Self {
            hours,
            policy,
            calendar,
        }
    }

    /// Returns the verdict for booking `party_size` guests at `instant`.
    ///
    /// Bounds are inclusive: a reservation exactly at opening or closing
    /// time is inside hours.
    pub async fn check(&self, instant: DateTime<Tz>, party_size: u32) -> AvailabilityVerdict {
        let day = self.hours.for_weekday(instant.weekday());
        let Some((open, close)) = day.parse() else {
            warn!(weekday = %instant.weekday(), "unparseable operating hours");
            return AvailabilityVerdict::unavailable(UnavailableReason::WithinHours);
        };

        let time = instant.time();
        if time < open || time > close {
            debug!(%instant, party_size, "requested time outside operating hours");
            return AvailabilityVerdict::unavailable(UnavailableReason::WithinHours);
        }

        let window = Duration::hours(self.policy.window_hours);
        match self
            .calendar
            .count_overlapping(instant.with_timezone(&chrono::Utc), window)
            .await
        {
            Ok(count) if count < self.policy.max_per_window => {
                debug!(count, party_size, "slot available");
                AvailabilityVerdict::available()
            }
            Ok(count) => {
                debug!(count, max = self.policy.max_per_window, "window at capacity");
                AvailabilityVerdict::unavailable(UnavailableReason::CapacityExceeded)
            }
            Err(e) if self.policy.fail_open_on_check_error => {
                warn!(error = %e, "capacity query failed, failing open");
                AvailabilityVerdict::available_degraded()
            }
            Err(e) => {
                warn!(error = %e, "capacity query failed, failing closed");
                AvailabilityVerdict::unavailable(UnavailableReason::ExternalCheckFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Karachi;
    use goldfork_test_utils::MockCalendar;

    fn checker(policy: BookingConfig, calendar: Arc<MockCalendar>) -> AvailabilityChecker {
        AvailabilityChecker::new(WeekHours::default(), policy, calendar)
    }

    fn wednesday_at(hour: u32, minute: u32) -> DateTime<Tz> {
        Karachi
            .with_ymd_and_hms(2026, 8, 26, hour, minute, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn inside_hours_with_room_is_available() {
        let calendar = Arc::new(MockCalendar::new());
        calendar.push_count(3).await;
        let checker = checker(BookingConfig::default(), calendar);

        let verdict = checker.check(wednesday_at(19, 0), 4).await;
        assert!(verdict.is_available);
        assert!(verdict.reason.is_none());
    }

    #[tokio::test]
    async fn hours_bounds_are_inclusive() {
        let calendar = Arc::new(MockCalendar::new());
        calendar.push_count(0).await;
        calendar.push_count(0).await;
        let checker = checker(BookingConfig::default(), calendar);

        // Wednesday opens 11:00, closes 22:00.
        assert!(checker.check(wednesday_at(11, 0), 2).await.is_available);
        assert!(checker.check(wednesday_at(22, 0), 2).await.is_available);
    }

    #[tokio::test]
    async fn outside_hours_is_unavailable() {
        let calendar = Arc::new(MockCalendar::new());
        let checker = checker(BookingConfig::default(), calendar.clone());

        let early = checker.check(wednesday_at(10, 59), 2).await;
        assert!(!early.is_available);
        assert_eq!(early.reason, Some(UnavailableReason::WithinHours));

        let late = checker.check(wednesday_at(22, 1), 2).await;
        assert!(!late.is_available);

        // Hours rejection short-circuits; the calendar is never queried.
        assert!(calendar.created_events().await.is_empty());
    }

    #[tokio::test]
    async fn window_at_capacity_is_unavailable() {
        let calendar = Arc::new(MockCalendar::new());
        calendar.push_count(9).await;
        calendar.push_count(10).await;
        let checker = checker(BookingConfig::default(), calendar);

        // One booking below the cap is fine.
        assert!(checker.check(wednesday_at(19, 0), 4).await.is_available);

        let full = checker.check(wednesday_at(19, 0), 4).await;
        assert!(!full.is_available);
        assert_eq!(full.reason, Some(UnavailableReason::CapacityExceeded));
    }

    #[tokio::test]
    async fn check_failure_fails_open_by_default() {
        let calendar = Arc::new(MockCalendar::new());
        calendar.fail_next_count().await;
        let checker = checker(BookingConfig::default(), calendar);

        let verdict = checker.check(wednesday_at(19, 0), 4).await;
        assert!(verdict.is_available);
        assert_eq!(verdict.reason, Some(UnavailableReason::ExternalCheckFailed));
    }

    #[tokio::test]
    async fn check_failure_fails_closed_when_configured() {
        let calendar = Arc::new(MockCalendar::new());
        calendar.fail_next_count().await;
        let policy = BookingConfig {
            fail_open_on_check_error: false,
            ..Default::default()
        };
        let checker = checker(policy, calendar);

        let verdict = checker.check(wednesday_at(19, 0), 4).await;
        assert!(!verdict.is_available);
        assert_eq!(verdict.reason, Some(UnavailableReason::ExternalCheckFailed));
    }
}
