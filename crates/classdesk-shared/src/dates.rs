//! Date string handling.
//!
//! The backend serializes `LocalDateTime` without an offset, while some proxies
//! and older endpoints hand back RFC 3339 strings. Dates are kept as strings in
//! the task model and compared by prefix, so these helpers only ever reshape
//! text; they never convert between time zones.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

/// `YYYY-MM-DD` rendering used for calendar keys.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// `YYYY-MM-DDTHH:MM:SS` rendering sent to the backend.
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

fn minutes_only() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}$").expect("valid regex"))
}

fn with_seconds() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}$").expect("valid regex")
    })
}

/// Parse any supported date or date-time string into a wall-clock value.
///
/// Offsets are dropped, not applied: `2025-09-15T23:30:00+08:00` is
/// 23:30 on the 15th.
pub fn parse_wall_clock(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_local());
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(input, DAY_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Normalize a date or date-time string to `YYYY-MM-DD`.
pub fn to_day_string(input: &str) -> Option<String> {
    parse_wall_clock(input).map(|dt| dt.format(DAY_FORMAT).to_string())
}

/// Render a calendar day key.
pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Format a user-entered deadline as `YYYY-MM-DDTHH:MM:SS` for the backend.
///
/// `datetime-local` inputs produce minute precision, which gains `:00`. Fully
/// specified values pass through untouched. Anything else parseable is
/// re-rendered; unparseable input yields `None`.
pub fn to_local_datetime(input: &str) -> Option<String> {
    let input = input.trim();
    if minutes_only().is_match(input) {
        return Some(format!("{input}:00"));
    }
    if with_seconds().is_match(input) {
        return Some(input.to_string());
    }
    parse_wall_clock(input).map(format_local_datetime)
}

pub fn format_local_datetime(dt: NaiveDateTime) -> String {
    dt.format(LOCAL_DATETIME_FORMAT).to_string()
}

/// Value for an `<input type="datetime-local">` (minute precision).
pub fn to_input_value(input: &str) -> String {
    parse_wall_clock(input)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
        .unwrap_or_default()
}

/// End of the given day, the default deadline for tasks created from a day view.
pub fn end_of_day(date: NaiveDate) -> String {
    date.and_hms_opt(23, 59, 59)
        .map(format_local_datetime)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_day_string_accepts_common_shapes() {
        for input in [
            "2025-09-15T10:30:00",
            "2025-09-15T10:30:00.123456",
            "2025-09-15T10:30",
            "2025-09-15 10:30:00",
            "2025-09-15",
            "2025-09-15T10:30:00Z",
            "2025-09-15T23:30:00+08:00",
        ] {
            assert_eq!(to_day_string(input).as_deref(), Some("2025-09-15"), "{input}");
        }
    }

    #[test]
    fn test_to_day_string_rejects_garbage() {
        assert_eq!(to_day_string(""), None);
        assert_eq!(to_day_string("next tuesday"), None);
        assert_eq!(to_day_string("2025-13-40"), None);
    }

    #[test]
    fn test_to_local_datetime() {
        assert_eq!(
            to_local_datetime("2025-09-15T10:30").as_deref(),
            Some("2025-09-15T10:30:00")
        );
        assert_eq!(
            to_local_datetime("2025-09-15T10:30:45").as_deref(),
            Some("2025-09-15T10:30:45")
        );
        assert_eq!(
            to_local_datetime("2025-09-15").as_deref(),
            Some("2025-09-15T00:00:00")
        );
        assert_eq!(
            to_local_datetime("2025-09-15T10:30:45+08:00").as_deref(),
            Some("2025-09-15T10:30:45")
        );
        assert_eq!(to_local_datetime("soon"), None);
    }

    #[test]
    fn test_input_value_and_end_of_day() {
        assert_eq!(to_input_value("2025-09-15T10:30:45"), "2025-09-15T10:30");
        assert_eq!(to_input_value("garbage"), "");
        let day = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        assert_eq!(end_of_day(day), "2025-02-28T23:59:59");
        assert_eq!(day_key(day), "2025-02-28");
    }
}
