//! # Time Formatting
//!
//! Renders a number of seconds as a zero-based UTC wall clock, so `3661`
//! becomes `01:01:01` with the default pattern.
//!
//! ## Pattern tokens
//!
//! | Token | Output |
//! |-------|--------|
//! | `HH` / `H` | hour 00-23, padded / unpadded |
//! | `hh` / `h` | hour 1-12, padded / unpadded |
//! | `mm` / `m` | minute |
//! | `ss` / `s` | second |
//! | `SSS` / `SS` / `S` | millisecond, centisecond, decisecond |
//! | `A` / `a` | `AM`/`PM`, `am`/`pm` |
//! | `[text]` | `text`, verbatim |
//!
//! Any other character is copied through. Values wrap at 24 hours: the
//! clock has no day component.

use chrono::{DateTime, Timelike, Utc};

pub use core_runtime::config::DEFAULT_TIME_FORMAT;

/// Rendering of values that cannot be placed on a clock (NaN, infinities,
/// values beyond the representable date range).
pub const INVALID_TIME: &str = "Invalid date";

/// Largest absolute timestamp, in milliseconds, that still renders.
const MAX_TIMESTAMP_MILLIS: f64 = 8.64e15;

const TOKENS: [&str; 13] = [
    "SSS", "HH", "hh", "mm", "ss", "SS", "H", "h", "m", "s", "S", "A", "a",
];

/// Formats `seconds` with `pattern`.
///
/// Fractions below a millisecond are truncated.
///
/// Only clock tokens are recognised. Date tokens such as `D`, `M` or `YYYY`
/// are copied through as text, where moment would render them against the
/// 1970-01-01 epoch (`D` as `1`, `YYYY` as `1970`). Bracket them if a pattern
/// shared with moment must render identically in both.
///
/// # Examples
///
/// ```
/// use core_playback::format_time;
///
/// assert_eq!(format_time(3661.0, "HH:mm:ss"), "01:01:01");
/// assert_eq!(format_time(185.0, "mm:ss"), "03:05");
/// assert_eq!(format_time(f64::NAN, "HH:mm:ss"), "Invalid date");
/// ```
pub fn format_time(seconds: f64, pattern: &str) -> String {
    let millis = (seconds * 1000.0).trunc();
    if !millis.is_finite() || millis.abs() > MAX_TIMESTAMP_MILLIS {
        return INVALID_TIME.to_string();
    }

    match DateTime::<Utc>::from_timestamp_millis(millis as i64) {
        Some(instant) => render(&instant, pattern),
        None => INVALID_TIME.to_string(),
    }
}

fn render(instant: &DateTime<Utc>, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut rest = pattern;

    while let Some(first) = rest.chars().next() {
        if first == '[' {
            if let Some(end) = rest.find(']') {
                out.push_str(&rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }

        if let Some(token) = TOKENS.iter().find(|token| rest.starts_with(**token)) {
            out.push_str(&render_token(instant, token));
            rest = &rest[token.len()..];
            continue;
        }

        out.push(first);
        rest = &rest[first.len_utf8()..];
    }

    out
}

fn render_token(instant: &DateTime<Utc>, token: &str) -> String {
    let hour = instant.hour();
    let twelve_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    let millis = instant.nanosecond() / 1_000_000;

    match token {
        "HH" => format!("{hour:02}"),
        "H" => hour.to_string(),
        "hh" => format!("{twelve_hour:02}"),
        "h" => twelve_hour.to_string(),
        "mm" => format!("{:02}", instant.minute()),
        "m" => instant.minute().to_string(),
        "ss" => format!("{:02}", instant.second()),
        "s" => instant.second().to_string(),
        "SSS" => format!("{millis:03}"),
        "SS" => format!("{:02}", millis / 10),
        "S" => (millis / 100).to_string(),
        "A" => (if hour < 12 { "AM" } else { "PM" }).to_string(),
        "a" => (if hour < 12 { "am" } else { "pm" }).to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pattern() {
        assert_eq!(format_time(0.0, DEFAULT_TIME_FORMAT), "00:00:00");
        assert_eq!(format_time(5.0, DEFAULT_TIME_FORMAT), "00:00:05");
        assert_eq!(format_time(180.0, DEFAULT_TIME_FORMAT), "00:03:00");
        assert_eq!(format_time(3661.0, DEFAULT_TIME_FORMAT), "01:01:01");
    }

    #[test]
    fn test_minutes_only_pattern_drops_hours() {
        assert_eq!(format_time(5.0, "mm:ss"), "00:05");
        assert_eq!(format_time(3725.0, "mm:ss"), "02:05");
    }

    #[test]
    fn test_clock_wraps_after_a_day() {
        assert_eq!(format_time(86_405.0, DEFAULT_TIME_FORMAT), "00:00:05");
    }

    #[test]
    fn test_fractions_truncate() {
        assert_eq!(format_time(5.999, "ss"), "05");
        assert_eq!(format_time(0.5, "ss.SSS"), "00.500");
        assert_eq!(format_time(1.25, "s.SS"), "1.25");
        assert_eq!(format_time(1.25, "s.S"), "1.2");
    }

    #[test]
    fn test_unpadded_tokens() {
        assert_eq!(format_time(3725.0, "H:m:s"), "1:2:5");
    }

    #[test]
    fn test_twelve_hour_clock() {
        assert_eq!(format_time(0.0, "hh a"), "12 am");
        assert_eq!(format_time(13.0 * 3600.0, "h A"), "1 PM");
    }

    #[test]
    fn test_bracketed_literals() {
        assert_eq!(format_time(65.0, "[at] mm:ss"), "at 01:05");
        assert_eq!(format_time(65.0, "m[m] s[s]"), "1m 5s");
    }

    #[test]
    fn test_unknown_characters_pass_through() {
        assert_eq!(format_time(65.0, "mm′ss″"), "01′05″");
        assert_eq!(format_time(65.0, "[mm"), "[01");
    }

    #[test]
    fn test_date_tokens_are_text() {
        assert_eq!(format_time(65.0, "D mm:ss"), "D 01:05");
        assert_eq!(format_time(65.0, "YYYY-MM-DD HH:mm"), "YYYY-MM-DD 00:01");
    }

    #[test]
    fn test_non_finite_is_invalid() {
        assert_eq!(format_time(f64::NAN, DEFAULT_TIME_FORMAT), INVALID_TIME);
        assert_eq!(format_time(f64::INFINITY, DEFAULT_TIME_FORMAT), INVALID_TIME);
        assert_eq!(format_time(f64::NEG_INFINITY, "mm:ss"), INVALID_TIME);
        assert_eq!(format_time(1e300, "mm:ss"), INVALID_TIME);
    }

    #[test]
    fn test_negative_values_count_back_from_midnight() {
        assert_eq!(format_time(-1.0, DEFAULT_TIME_FORMAT), "23:59:59");
    }
}
