//! Work queue broker configuration

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::source;

/// Name of the queue the suggestion worker consumes
pub const DEFAULT_QUEUE_NAME: &str = "ai-suggestions";

/// Redis-backed work queue configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueueConfig {
    /// Broker host
    pub host: String,

    /// Broker port
    pub port: u16,

    /// Redis database number (0-15)
    #[serde(default)]
    pub database: u8,

    /// Optional broker password
    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    /// Queue name
    #[serde(default = "default_queue_name")]
    pub name: String,

    /// Prefix for all queue keys
    #[serde(default = "default_prefix")]
    pub key_prefix: String,

    /// How long a single blocking pop waits before returning empty, in seconds
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 6379,
            database: 0,
            password: None,
            name: default_queue_name(),
            key_prefix: default_prefix(),
            poll_timeout: default_poll_timeout(),
        }
    }
}

impl QueueConfig {
    /// Create a queue configuration for a broker address
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Set the database number
    pub fn with_database(mut self, db: u8) -> Self {
        self.database = db.min(15);
        self
    }

    /// Load from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(&source::process_env)
    }

    pub fn from_lookup<F>(lookup: &F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            host: source::string_or(lookup, "QUEUE_HOST", &defaults.host),
            port: source::parse_or(lookup, "QUEUE_PORT", defaults.port)?,
            database: source::parse_or(lookup, "QUEUE_DB", defaults.database)?,
            password: source::optional(lookup, "QUEUE_PASSWORD"),
            name: source::string_or(lookup, "QUEUE_NAME", &defaults.name),
            key_prefix: source::string_or(lookup, "QUEUE_PREFIX", &defaults.key_prefix),
            poll_timeout: source::parse_or(lookup, "QUEUE_POLL_TIMEOUT_SECONDS", defaults.poll_timeout)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.port == 0 {
            return Err(ConfigError::invalid("QUEUE_PORT", "port must be non-zero"));
        }
        if self.database > 15 {
            return Err(ConfigError::invalid("QUEUE_DB", "database must be between 0 and 15"));
        }
        if self.poll_timeout == 0 {
            return Err(ConfigError::invalid(
                "QUEUE_POLL_TIMEOUT_SECONDS",
                "a zero timeout would block forever",
            ));
        }
        Ok(())
    }

    /// Redis connection URL for this broker
    pub fn url(&self) -> String {
        match &self.password {
            Some(password) => format!(
                "redis://:{}@{}:{}/{}",
                password, self.host, self.port, self.database
            ),
            None => format!("redis://{}:{}/{}", self.host, self.port, self.database),
        }
    }

    /// Key of the list holding jobs waiting to be processed
    pub fn wait_key(&self) -> String {
        format!("{}:{}:wait", self.key_prefix, self.name)
    }
}

fn default_queue_name() -> String {
    String::from(DEFAULT_QUEUE_NAME)
}

fn default_prefix() -> String {
    String::from("nudge")
}

fn default_poll_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_config_default() {
        let config = QueueConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 6379);
        assert_eq!(config.name, "ai-suggestions");
        assert_eq!(config.url(), "redis://127.0.0.1:6379/0");
        assert_eq!(config.wait_key(), "nudge:ai-suggestions:wait");
    }

    #[test]
    fn test_queue_config_from_lookup() {
        let lookup = |key: &str| match key {
            "QUEUE_HOST" => Some("queue.internal".to_string()),
            "QUEUE_PORT" => Some("6380".to_string()),
            "QUEUE_PASSWORD" => Some("hunter2".to_string()),
            _ => None,
        };
        let config = QueueConfig::from_lookup(&lookup).unwrap();

        assert_eq!(config.host, "queue.internal");
        assert_eq!(config.port, 6380);
        assert_eq!(config.url(), "redis://:hunter2@queue.internal:6380/0");
    }

    #[test]
    fn test_queue_config_rejects_bad_port() {
        let lookup = |key: &str| (key == "QUEUE_PORT").then(|| "0".to_string());
        assert!(QueueConfig::from_lookup(&lookup).is_err());

        let lookup = |key: &str| (key == "QUEUE_PORT").then(|| "70000".to_string());
        assert!(QueueConfig::from_lookup(&lookup).is_err());
    }

    #[test]
    fn test_builder_helpers() {
        let config = QueueConfig::new("redis", 6379)
            .with_name("other")
            .with_prefix("test")
            .with_database(42);

        assert_eq!(config.database, 15);
        assert_eq!(config.wait_key(), "test:other:wait");
    }
}
