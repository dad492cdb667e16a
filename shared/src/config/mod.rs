//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT secrets and token lifetimes
//! - `environment` - Environment detection and logging configuration
//! - `queue` - Work queue broker connection
//! - `server` - HTTP server binding
//!
//! Configuration is built once at process start through [`AppConfig::from_env`]
//! and handed to the services that need it. Missing secrets are fatal.

pub mod auth;
pub mod environment;
pub mod error;
pub mod queue;
pub mod server;
pub mod source;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::JwtConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use error::{ConfigError, ConfigResult};
pub use queue::QueueConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// JWT configuration
    pub auth: JwtConfig,

    /// Work queue configuration
    pub queue: QueueConfig,

    /// Server configuration
    pub server: ServerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// A `.env` file in the working directory is read first when present;
    /// variables already set in the environment take precedence.
    pub fn from_env() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(&source::process_env)
    }

    pub fn from_lookup<F>(lookup: &F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_lookup(lookup);
        Ok(Self {
            environment,
            auth: JwtConfig::from_lookup(lookup)?,
            queue: QueueConfig::from_lookup(lookup)?,
            server: ServerConfig::from_lookup(lookup)?,
            logging: LoggingConfig::for_environment(environment),
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}
