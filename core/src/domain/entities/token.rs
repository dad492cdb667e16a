//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TokenError;

/// Which secret and lifetime a token was issued under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential presented on each request
    Access,
    /// Long-lived credential used to obtain new access tokens
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal identifier)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Access or refresh
    pub kind: TokenKind,
}

impl Claims {
    /// Creates claims for `principal_id` valid from `issued_at` for `lifetime`
    ///
    /// The principal identifier is opaque and is not validated. Fails with
    /// `TokenGenerationFailed` when the expiry is not a representable instant.
    pub fn new(
        principal_id: &str,
        kind: TokenKind,
        issuer: &str,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, TokenError> {
        let expiry = issued_at
            .checked_add_signed(lifetime)
            .ok_or(TokenError::TokenGenerationFailed)?;

        Ok(Self {
            sub: principal_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expiry.timestamp(),
            nbf: issued_at.timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
            kind,
        })
    }

    /// Checks if the claims have expired at `now`, allowing `leeway` seconds of skew
    pub fn is_expired_at(&self, now: DateTime<Utc>, leeway: u64) -> bool {
        now.timestamp() >= self.exp.saturating_add(leeway as i64)
    }

    /// Checks if the claims are not yet valid at `now`, allowing `leeway` seconds of skew
    pub fn is_immature_at(&self, now: DateTime<Utc>, leeway: u64) -> bool {
        now.timestamp().saturating_add(leeway as i64) < self.nbf
    }

    /// Gets the expiration as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// A signed token together with its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Compact JWS string
    pub token: String,

    /// Access or refresh
    pub kind: TokenKind,

    /// When the token was issued
    pub issued_at: DateTime<Utc>,

    /// When the token stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Lifetime of the token in seconds
    pub fn expires_in(&self) -> i64 {
        (self.expires_at - self.issued_at).num_seconds()
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a token pair from an issued access and refresh token
    pub fn new(access: IssuedToken, refresh: IssuedToken) -> Self {
        Self {
            access_expires_in: access.expires_in(),
            refresh_expires_in: refresh.expires_in(),
            access_token: access.token,
            refresh_token: refresh.token,
        }
    }
}
