//! Human-readable formatting for distances, durations and restock dates.
//!
//! Everything here is pure: callers pass the current instant and the
//! viewer's time zone explicitly.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use regex::Regex;

static DAYS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*days?\b").expect("valid days regex"));
static HOURS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*hours?\b").expect("valid hours regex"));
static AND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+and\s+").expect("valid conjunction regex"));

/// `"1 warehouse"`, `"2 warehouses"`, `"0 warehouses"`.
#[must_use]
pub fn count_noun(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Distance with one decimal place, e.g. `"4.3 mi"`.
#[must_use]
pub fn format_distance(miles: f64) -> String {
    format!("{miles:.1} mi")
}

/// Total hours in a duration string such as `"2 days 3 hours"` or
/// `"1 day and 5 hours"`.
///
/// Both parts are optional; absent, empty or unrecognised text yields `0`.
#[must_use]
pub fn parse_duration_hours(text: Option<&str>) -> u32 {
    let Some(text) = text else {
        return 0;
    };
    let capture = |re: &Regex| -> u32 {
        re.captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    };
    capture(&DAYS_RE)
        .saturating_mul(24)
        .saturating_add(capture(&HOURS_RE))
}

/// Replace the word "and" between duration parts with a comma:
/// `"1 day and 4 hours"` becomes `"1 day, 4 hours"`.
#[must_use]
pub fn and_to_comma(text: &str) -> String {
    AND_RE.replace_all(text.trim(), ", ").into_owned()
}

/// Split a duration at its first comma for two-line display.
#[must_use]
pub fn split_first_comma(text: &str) -> (String, Option<String>) {
    match text.split_once(',') {
        Some((head, tail)) if !tail.trim().is_empty() => {
            (head.trim().to_string(), Some(tail.trim().to_string()))
        }
        _ => (text.trim().trim_end_matches(',').to_string(), None),
    }
}

/// Hours between `since` and `now`, never negative.
#[must_use]
pub fn elapsed_hours(since: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let minutes = (now - since).num_minutes().max(0);
    #[allow(clippy::cast_precision_loss)]
    let hours = minutes as f64 / 60.0;
    hours
}

/// Elapsed time as days and hours with correct pluralization, e.g.
/// `"2 days, 3 hours"` or `"5 hours"`.
#[must_use]
pub fn format_elapsed(hours: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = hours.max(0.0).floor() as usize;
    let days = whole / 24;
    let rem = whole % 24;
    if days == 0 {
        count_noun(rem, "hour")
    } else {
        format!("{}, {}", count_noun(days, "day"), count_noun(rem, "hour"))
    }
}

/// Coarse time-of-day bucket in the viewer's local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    /// Before noon.
    Morning,
    /// Noon up to 5 pm.
    MidDay,
    /// 5 pm onwards.
    Evening,
}

impl TimeOfDay {
    #[must_use]
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::MidDay,
            _ => TimeOfDay::Evening,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "MORNING",
            TimeOfDay::MidDay => "MID-DAY",
            TimeOfDay::Evening => "EVENING",
        }
    }
}

/// A timestamp reduced to month abbreviation, day of month and
/// time-of-day bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateBucket {
    /// Upper-case three-letter month, e.g. `"OCT"`.
    pub month: String,
    pub day: u32,
    pub time_of_day: TimeOfDay,
}

/// Bucket `ts` in the viewer's time zone `tz`.
#[must_use]
pub fn bucket_date<Tz: TimeZone>(ts: DateTime<Utc>, tz: &Tz) -> DateBucket {
    let local = ts.with_timezone(tz);
    DateBucket {
        month: month_abbrev(local.month()).to_string(),
        day: local.day(),
        time_of_day: TimeOfDay::from_hour(local.hour()),
    }
}

fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "JAN",
        2 => "FEB",
        3 => "MAR",
        4 => "APR",
        5 => "MAY",
        6 => "JUN",
        7 => "JUL",
        8 => "AUG",
        9 => "SEP",
        10 => "OCT",
        11 => "NOV",
        _ => "DEC",
    }
}
