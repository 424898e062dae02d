//! Human-readable relative times such as `3 days ago` or `1 hour from now`.
//!
//! A difference is reported in the largest unit that fits into it at least
//! once, truncated to a whole number. Months are 30 days and years 365 days.

use chrono::Utc;

const SECOND: u64 = 1_000;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const YEAR: u64 = 365 * DAY;

/// Unit lengths in milliseconds paired with their singular names, ascending.
const UNITS: [(u64, &str); 9] = [
    (SECOND, "second"),
    (MINUTE, "minute"),
    (HOUR, "hour"),
    (DAY, "day"),
    (7 * DAY, "week"),
    (30 * DAY, "month"),
    (YEAR, "year"),
    (10 * YEAR, "decade"),
    (100 * YEAR, "century"),
];

/// Text returned for differences under one second.
pub const JUST_NOW: &str = "Just now";

/// Describe `epoch_ms` relative to the current clock.
pub fn to_relative_time(epoch_ms: i64) -> String {
    to_relative_time_at(epoch_ms, Utc::now().timestamp_millis())
}

/// Describe `epoch_ms` relative to `now_ms`.
pub fn to_relative_time_at(epoch_ms: i64, now_ms: i64) -> String {
    let diff = i128::from(now_ms) - i128::from(epoch_ms);
    let magnitude = u64::try_from(diff.unsigned_abs()).unwrap_or(u64::MAX);
    if diff < 0 {
        compute_future_relative_time(magnitude)
    } else {
        compute_past_relative_time(magnitude)
    }
}

/// `"<n> <unit> ago"` for a difference of `diff_ms` milliseconds.
pub fn compute_past_relative_time(diff_ms: u64) -> String {
    describe(diff_ms, "ago")
}

/// `"<n> <unit> from now"` for a difference of `diff_ms` milliseconds.
pub fn compute_future_relative_time(diff_ms: u64) -> String {
    describe(diff_ms, "from now")
}

fn describe(diff_ms: u64, suffix: &str) -> String {
    let Some(&(len, unit)) = UNITS.iter().rev().find(|(len, _)| diff_ms >= *len) else {
        return JUST_NOW.to_string();
    };
    let count = diff_ms / len;
    if count > 1 {
        format!("{} {} {}", count, pluralize(unit), suffix)
    } else {
        format!("{} {} {}", count, unit, suffix)
    }
}

/// English plural of a unit name.
///
/// ```
/// use toolbelt::relative_time::pluralize;
///
/// assert_eq!(pluralize("century"), "centuries");
/// assert_eq!(pluralize("day"), "days");
/// ```
pub fn pluralize(word: &str) -> String {
    let lower = word.to_lowercase();
    if ["s", "sh", "ch", "x", "o"].iter().any(|e| lower.ends_with(e)) {
        return format!("{}es", word);
    }
    if let Some(stem) = word.strip_suffix(['y', 'Y']) {
        let before = lower.chars().rev().nth(1);
        return match before {
            Some('a' | 'e' | 'i' | 'o' | 'u') | None => format!("{}s", word),
            Some(_) => format!("{}ies", stem),
        };
    }
    if let Some(stem) = word.strip_suffix(['f', 'F']) {
        return format!("{}ves", stem);
    }
    format!("{}s", word)
}
