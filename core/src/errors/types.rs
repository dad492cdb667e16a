//! Domain-specific error types for token and job operations

use thiserror::Error;

/// Token-related errors
///
/// These errors represent token signing and verification failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Job dispatch errors
///
/// Handlers report failures through [`JobError::Handler`]; sources report
/// undecodable deliveries through [`JobError::MalformedPayload`] and broker
/// trouble through [`JobError::Source`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    #[error("Job handler failed: {message}")]
    Handler { message: String },

    #[error("Malformed job payload: {message}")]
    MalformedPayload { message: String },

    #[error("Job source unavailable: {message}")]
    Source { message: String },
}

impl JobError {
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler { message: message.into() }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPayload { message: message.into() }
    }

    pub fn source(message: impl Into<String>) -> Self {
        Self::Source { message: message.into() }
    }
}
