// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fuzzy fallback parser for date expressions outside the relative-day
//! vocabulary: ISO forms, numeric `M/D`, month-name forms, bare weekdays,
//! and bare clock times.
//!
//! Past-date correction lives here and only here: a same-day instant already
//! in the past advances one day; an instant more than 180 days past advances
//! one year; a near-past instant on a different day is returned unmodified.

use std::sync::LazyLock;

use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday,
};
use chrono_tz::Tz;
use regex::Regex;

use crate::{at_local, extract_clock_time, ClockTime, DEFAULT_HOUR};

static MONTH_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b(january|february|march|april|may|june|july|august|september|october|",
        r"november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec)\b",
        r"\.?\s+(\d{1,2})(?:st|nd|rd|th)?(?:,?\s*(\d{4}))?",
    ))
    .expect("valid month-name regex")
});

static DAY_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b(\d{1,2})(?:st|nd|rd|th)?\s+(?:of\s+)?",
        r"(january|february|march|april|may|june|july|august|september|october|",
        r"november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec)\b",
        r"(?:,?\s*(\d{4}))?",
    ))
    .expect("valid day-first regex")
});

static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{2,4}))?\b").expect("valid numeric regex")
});

static WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b")
        .expect("valid weekday regex")
});

/// A date candidate plus the byte span it was matched from, so the span can
/// be blanked before clock-time extraction ("december 25" is not 12:25).
struct DateMatch {
    date: NaiveDate,
    span: Option<(usize, usize)>,
    time: Option<ClockTime>,
}

pub(crate) fn parse(normalized: &str, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let explicit_time = normalized.contains("am")
        || normalized.contains("pm")
        || normalized.contains(':');

    let matched = find_date(normalized, now, explicit_time)?;

    let time = match matched.time {
        Some(t) => t,
        None if explicit_time => {
            let remainder = blank_span(normalized, matched.span);
            extract_clock_time(&remainder).unwrap_or(ClockTime {
                hour: DEFAULT_HOUR,
                minute: 0,
            })
        }
        // No am/pm and no colon anywhere: always 7 PM.
        None => ClockTime {
            hour: DEFAULT_HOUR,
            minute: 0,
        },
    };

    let candidate = at_local(now.timezone(), matched.date, time)?;
    Some(correct_past(candidate, now))
}

fn find_date(normalized: &str, now: &DateTime<Tz>, explicit_time: bool) -> Option<DateMatch> {
    let today = now.date_naive();

    // Full ISO datetime first: the time is part of the match.
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(normalized, format) {
            return Some(DateMatch {
                date: dt.date(),
                span: None,
                time: Some(ClockTime {
                    hour: dt.time().hour(),
                    minute: dt.time().minute(),
                }),
            });
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(normalized, "%Y-%m-%d") {
        return Some(DateMatch {
            date,
            span: None,
            time: None,
        });
    }

    if let Some(caps) = MONTH_NAME_RE.captures(normalized) {
        let month = month_number(caps.get(1)?.as_str())?;
        let day: u32 = caps.get(2)?.as_str().parse().ok()?;
        let year = parse_year(caps.get(3).map(|m| m.as_str()), today.year())?;
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let m = caps.get(0)?;
        return Some(DateMatch {
            date,
            span: Some((m.start(), m.end())),
            time: None,
        });
    }

    if let Some(caps) = DAY_FIRST_RE.captures(normalized) {
        let day: u32 = caps.get(1)?.as_str().parse().ok()?;
        let month = month_number(caps.get(2)?.as_str())?;
        let year = parse_year(caps.get(3).map(|m| m.as_str()), today.year())?;
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let m = caps.get(0)?;
        return Some(DateMatch {
            date,
            span: Some((m.start(), m.end())),
            time: None,
        });
    }

    if let Some(caps) = NUMERIC_RE.captures(normalized) {
        let first: u32 = caps.get(1)?.as_str().parse().ok()?;
        let second: u32 = caps.get(2)?.as_str().parse().ok()?;
        let year = parse_year(caps.get(3).map(|m| m.as_str()), today.year())?;
        // Month-first by default; swap when only that makes a valid month.
        let (month, day) = if first > 12 && second <= 12 {
            (second, first)
        } else {
            (first, second)
        };
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let m = caps.get(0)?;
        return Some(DateMatch {
            date,
            span: Some((m.start(), m.end())),
            time: None,
        });
    }

    if let Some(caps) = WEEKDAY_RE.captures(normalized) {
        let target = weekday_from_name(caps.get(1)?.as_str())?;
        // Upcoming occurrence; a bare weekday naming today means today.
        let days_ahead = (i64::from(target.num_days_from_monday())
            - i64::from(today.weekday().num_days_from_monday()))
        .rem_euclid(7);
        let m = caps.get(0)?;
        return Some(DateMatch {
            date: today + Duration::days(days_ahead),
            span: Some((m.start(), m.end())),
            time: None,
        });
    }

    // No date token at all: a bare clock time still resolves, anchored today.
    // Requires an unambiguous time marker (am/pm or a colon) so that a stray
    // digit never reads as a clock time.
    if explicit_time
        && let Some(time) = extract_clock_time(normalized)
    {
        return Some(DateMatch {
            date: today,
            span: None,
            time: Some(time),
        });
    }

    None
}

/// Past-date correction policy.
fn correct_past(candidate: DateTime<Tz>, now: &DateTime<Tz>) -> DateTime<Tz> {
    if candidate >= *now {
        return candidate;
    }
    if candidate.date_naive() == now.date_naive() {
        // Same day but already past: assume the next occurrence.
        return candidate + Duration::days(1);
    }
    if (*now - candidate) > Duration::days(180) {
        // More than six months past: assume next year.
        if let Some(shifted) = candidate.date_naive().with_year(candidate.year() + 1) {
            let time = ClockTime {
                hour: candidate.hour(),
                minute: candidate.minute(),
            };
            if let Some(rebuilt) = at_local(candidate.timezone(), shifted, time) {
                return rebuilt;
            }
        }
        return candidate;
    }
    // Near-past on a different day: returned unmodified. Known gap, kept.
    candidate
}

fn blank_span(text: &str, span: Option<(usize, usize)>) -> String {
    match span {
        Some((start, end)) => {
            let mut out = String::with_capacity(text.len());
            out.push_str(&text[..start]);
            out.push_str(&" ".repeat(end - start));
            out.push_str(&text[end..]);
            out
        }
        None => text.to_string(),
    }
}

fn month_number(name: &str) -> Option<u32> {
    let month = match &name[..3.min(name.len())] {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn parse_year(captured: Option<&str>, current: i32) -> Option<i32> {
    match captured {
        None => Some(current),
        Some(s) => {
            let y: i32 = s.parse().ok()?;
            Some(if y < 100 { 2000 + y } else { y })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve;
    use chrono::TimeZone;
    use chrono_tz::Asia::Karachi;

    /// Wednesday, 2026-08-26 12:00 local.
    fn now() -> DateTime<Tz> {
        Karachi.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap()
    }

    #[test]
    fn month_name_forms_default_to_seven_pm() {
        for input in ["august 30", "aug 30", "30 august", "30th of august"] {
            let resolved = resolve(input, now()).unwrap();
            assert_eq!(
                resolved.date_naive(),
                NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
                "input: {input}"
            );
            assert_eq!(resolved.format("%H:%M").to_string(), "19:00", "input: {input}");
        }
    }

    #[test]
    fn month_name_with_explicit_time() {
        let resolved = resolve("september 4 at 8:15pm", now()).unwrap();
        assert_eq!(resolved.date_naive(), NaiveDate::from_ymd_opt(2026, 9, 4).unwrap());
        assert_eq!(resolved.format("%H:%M").to_string(), "20:15");
    }

    #[test]
    fn date_digits_are_not_misread_as_clock_time() {
        // "25" must not become a clock-time candidate; no am/pm/colon here
        // means 19:00.
        let resolved = resolve("december 25, 2026", now()).unwrap();
        assert_eq!(resolved.date_naive(), NaiveDate::from_ymd_opt(2026, 12, 25).unwrap());
        assert_eq!(resolved.format("%H:%M").to_string(), "19:00");
    }

    #[test]
    fn numeric_dates_swap_when_month_is_impossible() {
        let resolved = resolve("25/12", now()).unwrap();
        assert_eq!(resolved.date_naive(), NaiveDate::from_ymd_opt(2026, 12, 25).unwrap());

        let resolved = resolve("12/25", now()).unwrap();
        assert_eq!(resolved.date_naive(), NaiveDate::from_ymd_opt(2026, 12, 25).unwrap());
    }

    #[test]
    fn iso_forms_keep_their_time() {
        let resolved = resolve("2026-12-25 18:30", now()).unwrap();
        assert_eq!(resolved.date_naive(), NaiveDate::from_ymd_opt(2026, 12, 25).unwrap());
        assert_eq!(resolved.format("%H:%M").to_string(), "18:30");

        let resolved = resolve("2026-12-25", now()).unwrap();
        assert_eq!(resolved.format("%H:%M").to_string(), "19:00");
    }

    #[test]
    fn bare_time_anchors_to_today() {
        // Reference now is 12:00, so 7pm today is still ahead.
        let resolved = resolve("7pm", now()).unwrap();
        assert_eq!(resolved.date_naive(), now().date_naive());
        assert_eq!(resolved.format("%H:%M").to_string(), "19:00");
    }

    #[test]
    fn same_day_past_time_advances_one_day() {
        let evening = Karachi.with_ymd_and_hms(2026, 8, 26, 18, 0, 0).unwrap();
        let resolved = resolve("5pm", evening).unwrap();
        assert_eq!(resolved.date_naive(), NaiveDate::from_ymd_opt(2026, 8, 27).unwrap());
        assert_eq!(resolved.format("%H:%M").to_string(), "17:00");
    }

    #[test]
    fn distant_past_advances_one_year() {
        // January 5 is more than 180 days before the late-August reference.
        let resolved = resolve("january 5", now()).unwrap();
        assert_eq!(resolved.date_naive(), NaiveDate::from_ymd_opt(2027, 1, 5).unwrap());
    }

    #[test]
    fn near_past_on_a_different_day_is_returned_unmodified() {
        // Six days back, within the 180-day horizon: no correction applies.
        let resolved = resolve("august 20", now()).unwrap();
        assert_eq!(resolved.date_naive(), NaiveDate::from_ymd_opt(2026, 8, 20).unwrap());
        assert!(resolved < now());
    }

    #[test]
    fn bare_weekday_resolves_to_upcoming_occurrence() {
        let resolved = resolve("friday", now()).unwrap();
        assert_eq!(resolved.date_naive(), NaiveDate::from_ymd_opt(2026, 8, 28).unwrap());
        assert_eq!(resolved.format("%H:%M").to_string(), "19:00");
    }

    #[test]
    fn month_fragments_inside_words_do_not_match() {
        // "market" must not read as "mar".
        assert!(resolve("market 5", now()).is_err());
    }

    #[test]
    fn invalid_calendar_dates_fail() {
        assert!(resolve("february 30", now()).is_err());
        assert!(resolve("99/99", now()).is_err());
    }
}
