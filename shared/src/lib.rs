//! Shared utilities and common types for the Nudge server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and environment loading
//! - Duration parsing for token lifetimes
//! - Tracing subscriber setup for the binaries

pub mod config;
pub mod telemetry;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, ConfigResult, Environment, JwtConfig, LogFormat, LoggingConfig,
    QueueConfig, ServerConfig,
};
pub use telemetry::{init_tracing, TelemetryError};
pub use utils::{parse_duration, DurationParseError};
