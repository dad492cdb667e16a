//! Helpers for reading configuration values from a key lookup
//!
//! Every `from_lookup` constructor takes a closure instead of reading the
//! process environment directly, so the same code serves `from_env` and tests.

use std::str::FromStr;

use super::error::{ConfigError, ConfigResult};

/// Read the process environment
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Non-empty, trimmed value for `key`
pub(crate) fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn required<F>(lookup: &F, key: &str) -> ConfigResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or_else(|| ConfigError::missing(key))
}

pub(crate) fn string_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).unwrap_or_else(|| default.to_string())
}

pub(crate) fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> ConfigResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(lookup, key) {
        Some(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::invalid(key, e.to_string())),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_blank_values_are_treated_as_absent() {
        let lookup = lookup_from(&[("KEY", "   ")]);
        assert_eq!(optional(&lookup, "KEY"), None);
        assert_eq!(required(&lookup, "KEY"), Err(ConfigError::missing("KEY")));
    }

    #[test]
    fn test_parse_or_uses_default_and_reports_bad_values() {
        let lookup = lookup_from(&[("PORT", "not-a-port")]);
        assert_eq!(parse_or(&lookup, "OTHER", 42u16).unwrap(), 42);
        assert!(matches!(
            parse_or::<_, u16>(&lookup, "PORT", 1),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
