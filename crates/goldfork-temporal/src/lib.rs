// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Natural-language date/time resolution.
//!
//! Turns customer phrasing ("tomorrow at 7pm", "next friday", "august 30")
//! into a timezone-qualified instant. Resolution is a pure function of the
//! input text and a reference "now"; no I/O.
//!
//! Two paths: a fixed relative-day vocabulary (today / tomorrow / day after
//! tomorrow / next <weekday>), then a fuzzy fallback parser for everything
//! else. An explicit clock time must be unambiguously present in the text;
//! otherwise the resolved time is always 19:00 local.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Weekday};
use chrono_tz::Tz;
use regex::Regex;
use thiserror::Error;

mod fuzzy;

/// The input could not be resolved to a date/time.
///
/// Recoverable: callers should ask the customer to clarify, not fail the turn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not resolve a date/time from {input:?}")]
pub struct ParseFailure {
    pub input: String,
}

/// Reservations default to dinner time when no clock time is given.
const DEFAULT_HOUR: u32 = 19;

/// Clock-time pattern: `H` or `H:MM`, optionally followed by am/pm.
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})(?::(\d{2}))?\s*(am|pm)?").expect("valid time regex")
});

/// A clock time extracted from text, already converted to 24-hour form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClockTime {
    hour: u32,
    minute: u32,
}

/// Resolve a natural-language date/time string against a reference instant.
///
/// The returned instant carries the same timezone as `reference_now`. When no
/// clock time is present in the text, the time defaults to 19:00 local.
pub fn resolve(text: &str, reference_now: DateTime<Tz>) -> Result<DateTime<Tz>, ParseFailure> {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(ParseFailure { input: text.into() });
    }

    if let Some(date) = match_relative_day(&normalized, &reference_now) {
        let time = extract_clock_time(&normalized)
            .unwrap_or(ClockTime { hour: DEFAULT_HOUR, minute: 0 });
        return at_local(reference_now.timezone(), date, time)
            .ok_or_else(|| ParseFailure { input: text.into() });
    }

    fuzzy::parse(&normalized, &reference_now).ok_or_else(|| ParseFailure { input: text.into() })
}

/// Match the fixed relative-day vocabulary. Longer phrases are checked first
/// so "day after tomorrow" is never shadowed by "tomorrow".
fn match_relative_day(normalized: &str, now: &DateTime<Tz>) -> Option<NaiveDate> {
    let today = now.date_naive();

    if normalized.contains("day after tomorrow") {
        return Some(today + Duration::days(2));
    }
    if normalized.contains("tomorrow") {
        return Some(today + Duration::days(1));
    }
    if normalized.contains("today") {
        return Some(today);
    }

    const WEEKDAYS: [(&str, Weekday); 7] = [
        ("next monday", Weekday::Mon),
        ("next tuesday", Weekday::Tue),
        ("next wednesday", Weekday::Wed),
        ("next thursday", Weekday::Thu),
        ("next friday", Weekday::Fri),
        ("next saturday", Weekday::Sat),
        ("next sunday", Weekday::Sun),
    ];
    for (phrase, weekday) in WEEKDAYS {
        if normalized.contains(phrase) {
            return Some(next_weekday(today, weekday));
        }
    }
    None
}

/// Next occurrence of `target` strictly after `today`. If today already is the
/// target weekday, the following week's occurrence is returned.
fn next_weekday(today: NaiveDate, target: Weekday) -> NaiveDate {
    let mut days_ahead = i64::from(target.num_days_from_monday())
        - i64::from(today.weekday().num_days_from_monday());
    if days_ahead <= 0 {
        days_ahead += 7;
    }
    today + Duration::days(days_ahead)
}

/// Extract a trailing clock time, applying standard noon/midnight rules.
/// Returns `None` when the text carries no digits, or when the digits do not
/// form a valid time of day.
fn extract_clock_time(normalized: &str) -> Option<ClockTime> {
    let caps = TIME_RE.captures(normalized)?;
    let mut hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = caps
        .get(2)
        .map(|m| m.as_str().parse())
        .transpose()
        .ok()?
        .unwrap_or(0);
    match caps.get(3).map(|m| m.as_str()) {
        Some("pm") if hour < 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        _ => {}
    }
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(ClockTime { hour, minute })
}

/// Builds a timezone-qualified instant from local date and time. On a DST gap
/// or fold, the earliest valid interpretation wins.
fn at_local(tz: Tz, date: NaiveDate, time: ClockTime) -> Option<DateTime<Tz>> {
    let naive = date.and_time(NaiveTime::from_hms_opt(time.hour, time.minute, 0)?);
    tz.from_local_datetime(&naive).earliest()
}
