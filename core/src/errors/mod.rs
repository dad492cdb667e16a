//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{JobError, TokenError};

use nudge_shared::ConfigError;
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Job(#[from] JobError),
}

pub type DomainResult<T> = Result<T, DomainError>;
