//! # Infrastructure Layer
//!
//! Concrete implementations of the seams defined in `nudge_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Queue**: Redis client and the Redis-backed work queue consumed by the worker

use nudge_shared::ConfigError;

/// Queue module - Redis client and list-backed job queue
pub mod queue;

pub use queue::{RedisClient, RedisJobQueue};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis broker error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Job payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
