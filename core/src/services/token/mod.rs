//! Token service module for JWT management
//!
//! This module handles token-related operations:
//! - Access token issuance and verification (access secret, default 15 minutes)
//! - Refresh token issuance and verification (refresh secret, default 7 days)
//!
//! Tokens are not persisted and cannot be revoked.

mod keys;
mod service;

#[cfg(test)]
mod tests;

pub use service::TokenService;
