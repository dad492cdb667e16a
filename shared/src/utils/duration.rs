//! Human-readable duration parsing for token lifetimes
//!
//! Accepts the compact `<number><unit>` notation used in environment files
//! (`15m`, `7d`, `1.5h`, `2 days`). A bare number is read as milliseconds,
//! matching the `ms` package that Node JWT libraries use for string lifetimes.

use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;
use thiserror::Error;

static DURATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*([A-Za-z]*)\s*$").unwrap()
});

const SECOND_MS: f64 = 1_000.0;
const MINUTE_MS: f64 = SECOND_MS * 60.0;
const HOUR_MS: f64 = MINUTE_MS * 60.0;
const DAY_MS: f64 = HOUR_MS * 24.0;
const WEEK_MS: f64 = DAY_MS * 7.0;
const YEAR_MS: f64 = DAY_MS * 365.25;

/// Errors produced while parsing a duration string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("duration is empty")]
    Empty,

    #[error("unrecognized duration format: {0}")]
    InvalidFormat(String),

    #[error("unknown duration unit: {0}")]
    UnknownUnit(String),
}

/// Parse a duration such as `15m`, `7d` or `90000` (milliseconds)
pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    if input.trim().is_empty() {
        return Err(DurationParseError::Empty);
    }

    let captures = DURATION_REGEX
        .captures(input)
        .ok_or_else(|| DurationParseError::InvalidFormat(input.to_string()))?;

    let amount: f64 = captures[1]
        .parse()
        .map_err(|_| DurationParseError::InvalidFormat(input.to_string()))?;

    let unit = captures[2].to_lowercase();
    let multiplier = unit_in_millis(&unit)
        .ok_or_else(|| DurationParseError::UnknownUnit(captures[2].to_string()))?;

    let millis = (amount * multiplier).round();
    if !millis.is_finite() || millis > u64::MAX as f64 {
        return Err(DurationParseError::InvalidFormat(input.to_string()));
    }

    Ok(Duration::from_millis(millis as u64))
}

fn unit_in_millis(unit: &str) -> Option<f64> {
    let millis = match unit {
        "" | "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1.0,
        "s" | "sec" | "secs" | "second" | "seconds" => SECOND_MS,
        "m" | "min" | "mins" | "minute" | "minutes" => MINUTE_MS,
        "h" | "hr" | "hrs" | "hour" | "hours" => HOUR_MS,
        "d" | "day" | "days" => DAY_MS,
        "w" | "week" | "weeks" => WEEK_MS,
        "y" | "yr" | "yrs" | "year" | "years" => YEAR_MS,
        _ => return None,
    };
    Some(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_lifetimes() {
        assert_eq!(parse_duration("15m").unwrap(), Duration::from_secs(15 * 60));
        assert_eq!(parse_duration("7d").unwrap(), Duration::from_secs(7 * 86_400));
    }

    #[test]
    fn test_parse_long_unit_names() {
        assert_eq!(parse_duration("2 days").unwrap(), Duration::from_secs(2 * 86_400));
        assert_eq!(parse_duration("30 Minutes").unwrap(), Duration::from_secs(30 * 60));
        assert_eq!(parse_duration("1 week").unwrap(), Duration::from_secs(7 * 86_400));
    }

    #[test]
    fn test_parse_fractional_and_millis() {
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5_400));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn test_bare_number_is_milliseconds() {
        assert_eq!(parse_duration("900").unwrap(), Duration::from_millis(900));
        assert_eq!(parse_duration("90000").unwrap(), Duration::from_secs(90));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_duration(""), Err(DurationParseError::Empty));
        assert_eq!(parse_duration("   "), Err(DurationParseError::Empty));
        assert!(matches!(parse_duration("soon"), Err(DurationParseError::InvalidFormat(_))));
        assert!(matches!(parse_duration("-5m"), Err(DurationParseError::InvalidFormat(_))));
        assert_eq!(
            parse_duration("5 fortnights"),
            Err(DurationParseError::UnknownUnit("fortnights".to_string()))
        );
    }
}
