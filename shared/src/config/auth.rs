//! Authentication configuration

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{ConfigError, ConfigResult};
use super::source;
use crate::utils::parse_duration;

pub const ACCESS_SECRET_KEY: &str = "JWT_ACCESS_SECRET";
pub const REFRESH_SECRET_KEY: &str = "JWT_REFRESH_SECRET";
pub const ACCESS_EXPIRES_IN_KEY: &str = "ACCESS_TOKEN_EXPIRES_IN";
pub const REFRESH_EXPIRES_IN_KEY: &str = "REFRESH_TOKEN_EXPIRES_IN";

/// Default access token lifetime
pub const DEFAULT_ACCESS_EXPIRES_IN: &str = "15m";

/// Default refresh token lifetime
pub const DEFAULT_REFRESH_EXPIRES_IN: &str = "7d";

/// Longest accepted token lifetime (100 years)
pub const MAX_TOKEN_LIFETIME_SECONDS: i64 = 3_155_760_000;

/// JWT signing configuration
///
/// Access and refresh tokens are keyed independently: each has its own
/// secret and its own lifetime. The two secrets must never be equal.
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret used to sign access tokens
    #[serde(skip_serializing)]
    pub access_secret: String,

    /// Secret used to sign refresh tokens
    #[serde(skip_serializing)]
    pub refresh_secret: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Clock skew tolerance applied when verifying, in seconds
    #[serde(default)]
    pub leeway: u64,
}

impl JwtConfig {
    /// Create a configuration with the default lifetimes (15 minutes / 7 days)
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_token_expiry: 15 * 60,
            refresh_token_expiry: 7 * 86_400,
            issuer: default_issuer(),
            leeway: 0,
        }
    }

    /// Set access token expiry in seconds
    pub fn with_access_expiry_seconds(mut self, seconds: i64) -> Self {
        self.access_token_expiry = seconds;
        self
    }

    /// Set refresh token expiry in seconds
    pub fn with_refresh_expiry_seconds(mut self, seconds: i64) -> Self {
        self.refresh_token_expiry = seconds;
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.leeway = seconds;
        self
    }

    /// Load from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(&source::process_env)
    }

    /// Load from an arbitrary key lookup
    ///
    /// Both secrets are required. Expirations default to `15m` and `7d`.
    pub fn from_lookup<F>(lookup: &F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_secret = source::required(lookup, ACCESS_SECRET_KEY)?;
        let refresh_secret = source::required(lookup, REFRESH_SECRET_KEY)?;

        let access_token_expiry = expiry_seconds(
            ACCESS_EXPIRES_IN_KEY,
            &source::string_or(lookup, ACCESS_EXPIRES_IN_KEY, DEFAULT_ACCESS_EXPIRES_IN),
        )?;
        let refresh_token_expiry = expiry_seconds(
            REFRESH_EXPIRES_IN_KEY,
            &source::string_or(lookup, REFRESH_EXPIRES_IN_KEY, DEFAULT_REFRESH_EXPIRES_IN),
        )?;

        let config = Self {
            access_secret,
            refresh_secret,
            access_token_expiry,
            refresh_token_expiry,
            issuer: source::string_or(lookup, "JWT_ISSUER", &default_issuer()),
            leeway: source::parse_or(lookup, "JWT_LEEWAY_SECONDS", 0)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the token issuer relies on
    pub fn validate(&self) -> ConfigResult<()> {
        if self.access_secret.is_empty() {
            return Err(ConfigError::missing(ACCESS_SECRET_KEY));
        }
        if self.refresh_secret.is_empty() {
            return Err(ConfigError::missing(REFRESH_SECRET_KEY));
        }
        if self.access_secret == self.refresh_secret {
            return Err(ConfigError::SharedSecret);
        }
        check_lifetime(ACCESS_EXPIRES_IN_KEY, self.access_token_expiry)?;
        check_lifetime(REFRESH_EXPIRES_IN_KEY, self.refresh_token_expiry)
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_secret", &"[redacted]")
            .field("refresh_secret", &"[redacted]")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .field("issuer", &self.issuer)
            .field("leeway", &self.leeway)
            .finish()
    }
}

fn expiry_seconds(key: &str, raw: &str) -> ConfigResult<i64> {
    let duration = parse_duration(raw).map_err(|e| ConfigError::invalid(key, e.to_string()))?;
    let seconds = i64::try_from(duration.as_secs())
        .map_err(|_| ConfigError::invalid(key, "duration is too large"))?;
    if seconds == 0 {
        return Err(ConfigError::invalid(key, "must be at least one second"));
    }
    Ok(seconds)
}

fn check_lifetime(key: &str, seconds: i64) -> ConfigResult<()> {
    if seconds <= 0 {
        return Err(ConfigError::invalid(key, "must be at least one second"));
    }
    if seconds > MAX_TOKEN_LIFETIME_SECONDS {
        return Err(ConfigError::invalid(key, "must not exceed 100 years"));
    }
    Ok(())
}

fn default_issuer() -> String {
    String::from("nudge")
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
    fn test_defaults_apply_when_expiry_unset() {
        let lookup = lookup_from(&[
            (ACCESS_SECRET_KEY, "access-secret"),
            (REFRESH_SECRET_KEY, "refresh-secret"),
        ]);
        let config = JwtConfig::from_lookup(&lookup).unwrap();

        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604_800);
        assert_eq!(config.issuer, "nudge");
        assert_eq!(config.leeway, 0);
    }

    #[test]
    fn test_expiry_overrides() {
        let lookup = lookup_from(&[
            (ACCESS_SECRET_KEY, "access-secret"),
            (REFRESH_SECRET_KEY, "refresh-secret"),
            (ACCESS_EXPIRES_IN_KEY, "1h"),
            (REFRESH_EXPIRES_IN_KEY, "30 days"),
        ]);
        let config = JwtConfig::from_lookup(&lookup).unwrap();

        assert_eq!(config.access_token_expiry, 3_600);
        assert_eq!(config.refresh_token_expiry, 30 * 86_400);
    }

    #[test]
    fn test_missing_secrets_fail() {
        let only_refresh = lookup_from(&[(REFRESH_SECRET_KEY, "refresh-secret")]);
        assert_eq!(
            JwtConfig::from_lookup(&only_refresh).unwrap_err(),
            ConfigError::missing(ACCESS_SECRET_KEY)
        );

        let only_access = lookup_from(&[(ACCESS_SECRET_KEY, "access-secret")]);
        assert_eq!(
            JwtConfig::from_lookup(&only_access).unwrap_err(),
            ConfigError::missing(REFRESH_SECRET_KEY)
        );
    }

    #[test]
    fn test_shared_secret_rejected() {
        let lookup = lookup_from(&[
            (ACCESS_SECRET_KEY, "same"),
            (REFRESH_SECRET_KEY, "same"),
        ]);
        assert_eq!(JwtConfig::from_lookup(&lookup).unwrap_err(), ConfigError::SharedSecret);
    }

    #[test]
    fn test_bad_expiry_rejected() {
        let garbage = lookup_from(&[
            (ACCESS_SECRET_KEY, "a"),
            (REFRESH_SECRET_KEY, "b"),
            (ACCESS_EXPIRES_IN_KEY, "later"),
        ]);
        assert!(matches!(
            JwtConfig::from_lookup(&garbage),
            Err(ConfigError::Invalid { ref key, .. }) if key == ACCESS_EXPIRES_IN_KEY
        ));

        let sub_second = lookup_from(&[
            (ACCESS_SECRET_KEY, "a"),
            (REFRESH_SECRET_KEY, "b"),
            (REFRESH_EXPIRES_IN_KEY, "500ms"),
        ]);
        assert!(matches!(
            JwtConfig::from_lookup(&sub_second),
            Err(ConfigError::Invalid { ref key, .. }) if key == REFRESH_EXPIRES_IN_KEY
        ));
    }

    #[test]
    fn test_bare_number_expiry_is_milliseconds() {
        let lookup = lookup_from(&[
            (ACCESS_SECRET_KEY, "a"),
            (REFRESH_SECRET_KEY, "b"),
            (ACCESS_EXPIRES_IN_KEY, "90000"),
        ]);
        assert_eq!(JwtConfig::from_lookup(&lookup).unwrap().access_token_expiry, 90);

        let too_short = lookup_from(&[
            (ACCESS_SECRET_KEY, "a"),
            (REFRESH_SECRET_KEY, "b"),
            (ACCESS_EXPIRES_IN_KEY, "900"),
        ]);
        assert!(matches!(
            JwtConfig::from_lookup(&too_short),
            Err(ConfigError::Invalid { ref key, .. }) if key == ACCESS_EXPIRES_IN_KEY
        ));
    }

    #[test]
    fn test_oversized_expiry_rejected() {
        let lookup = lookup_from(&[
            (ACCESS_SECRET_KEY, "a"),
            (REFRESH_SECRET_KEY, "b"),
            (ACCESS_EXPIRES_IN_KEY, "1000000y"),
        ]);
        assert!(matches!(
            JwtConfig::from_lookup(&lookup),
            Err(ConfigError::Invalid { ref key, .. }) if key == ACCESS_EXPIRES_IN_KEY
        ));

        let at_limit = JwtConfig::new("a", "b").with_refresh_expiry_seconds(MAX_TOKEN_LIFETIME_SECONDS);
        assert!(at_limit.validate().is_ok());

        let huge = JwtConfig::new("a", "b").with_refresh_expiry_seconds(i64::MAX);
        assert!(matches!(
            huge.validate(),
            Err(ConfigError::Invalid { ref key, .. }) if key == REFRESH_EXPIRES_IN_KEY
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = JwtConfig::new("top-secret-access", "top-secret-refresh");
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("top-secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
