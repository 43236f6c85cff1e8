//! Display formatting for the dates a verification service hands back.
//!
//! Services disagree on how dates travel: some send Unix seconds, some send a
//! calendar string. Both end up as `Mon D, YYYY` (`Nov 14, 2023`).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

pub const NOT_AVAILABLE: &str = "N/A";

const DISPLAY_FORMAT: &str = "%b %-d, %Y";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%b %d, %Y", "%B %d, %Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Formats a JSON date value.
///
/// Numbers are Unix seconds (UTC). Strings are parsed as calendar dates.
/// Anything absent, zero, empty or unparseable renders as [`NOT_AVAILABLE`].
pub fn format_date(input: Option<&Value>) -> String {
    let date: Option<NaiveDate> = match input {
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|secs| *secs != 0.0)
            .and_then(from_unix_seconds),
        Some(Value::String(s)) => parse_calendar_date(s),
        _ => None,
    };

    display(date)
}

/// Formats a calendar date string, see [`format_date`].
pub fn format_date_str(input: &str) -> String {
    display(parse_calendar_date(input))
}

fn display(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn from_unix_seconds(secs: f64) -> Option<NaiveDate> {
    if !secs.is_finite() {
        return None;
    }
    DateTime::from_timestamp(secs.floor() as i64, 0).map(|dt| dt.date_naive())
}

fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
                .map(|dt| dt.date())
        })
}
