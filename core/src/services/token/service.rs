//! Main token service implementation

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use nudge_shared::JwtConfig;
use tracing::debug;

use crate::domain::entities::token::{Claims, IssuedToken, TokenKind, TokenPair};
use crate::errors::{DomainError, TokenError};

use super::keys::SigningKeys;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Issues and verifies access and refresh tokens
///
/// All key material is derived once in [`TokenService::new`]. Issuing a
/// token is a synchronous, side-effect-free computation: nothing is stored
/// and nothing can be revoked.
#[derive(Debug, Clone)]
pub struct TokenService {
    access: SigningKeys,
    refresh: SigningKeys,
    issuer: String,
    leeway: u64,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `config` - JWT configuration carrying both secrets and lifetimes
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or a configuration error if either secret is
    /// missing, the secrets are shared, or a lifetime is out of range
    pub fn new(config: &JwtConfig) -> Result<Self, DomainError> {
        config.validate()?;

        let access = SigningKeys::from_secret(
            TokenKind::Access,
            &config.access_secret,
            config.access_token_expiry,
        )?;
        let refresh = SigningKeys::from_secret(
            TokenKind::Refresh,
            &config.refresh_secret,
            config.refresh_token_expiry,
        )?;

        // Time-based claims are checked against an explicit clock in `verify_at`
        let mut validation = Validation::new(ALGORITHM);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        Ok(Self {
            access,
            refresh,
            issuer: config.issuer.clone(),
            leeway: config.leeway,
            validation,
        })
    }

    /// Issues an access token for `principal_id`
    pub fn issue_access_token(&self, principal_id: &str) -> Result<IssuedToken, DomainError> {
        self.issue_at(TokenKind::Access, principal_id, Utc::now())
    }

    /// Issues a refresh token for `principal_id`
    pub fn issue_refresh_token(&self, principal_id: &str) -> Result<IssuedToken, DomainError> {
        self.issue_at(TokenKind::Refresh, principal_id, Utc::now())
    }

    /// Issues an access token as if the current time were `now`
    pub fn issue_access_token_at(
        &self,
        principal_id: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, DomainError> {
        self.issue_at(TokenKind::Access, principal_id, now)
    }

    /// Issues a refresh token as if the current time were `now`
    pub fn issue_refresh_token_at(
        &self,
        principal_id: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, DomainError> {
        self.issue_at(TokenKind::Refresh, principal_id, now)
    }

    /// Issues both tokens for `principal_id` at the same instant
    pub fn issue_token_pair(&self, principal_id: &str) -> Result<TokenPair, DomainError> {
        let now = Utc::now();
        let access = self.issue_at(TokenKind::Access, principal_id, now)?;
        let refresh = self.issue_at(TokenKind::Refresh, principal_id, now)?;
        Ok(TokenPair::new(access, refresh))
    }

    /// Verifies an access token and returns the claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(TokenError)` - Token is expired, tampered, malformed, or of the wrong kind
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.verify_at(TokenKind::Access, token, Utc::now())
    }

    /// Verifies a refresh token and returns the claims
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.verify_at(TokenKind::Refresh, token, Utc::now())
    }

    pub fn verify_access_token_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Claims, DomainError> {
        self.verify_at(TokenKind::Access, token, now)
    }

    pub fn verify_refresh_token_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Claims, DomainError> {
        self.verify_at(TokenKind::Refresh, token, now)
    }

    /// Configured lifetime of access tokens in seconds
    pub fn access_token_lifetime(&self) -> i64 {
        self.access.lifetime.num_seconds()
    }

    /// Configured lifetime of refresh tokens in seconds
    pub fn refresh_token_lifetime(&self) -> i64 {
        self.refresh.lifetime.num_seconds()
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    fn issue_at(
        &self,
        kind: TokenKind,
        principal_id: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, DomainError> {
        let keys = self.keys(kind);
        let claims = Claims::new(principal_id, kind, &self.issuer, now, keys.lifetime)?;
        let expires_at = now
            .checked_add_signed(keys.lifetime)
            .ok_or(TokenError::TokenGenerationFailed)?;

        let token = encode(&Header::new(ALGORITHM), &claims, &keys.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))?;

        debug!(kind = %kind, jti = %claims.jti, exp = claims.exp, "Issued token");

        Ok(IssuedToken {
            token,
            kind,
            issued_at: now,
            expires_at,
        })
    }

    fn verify_at(
        &self,
        kind: TokenKind,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Claims, DomainError> {
        let keys = self.keys(kind);
        let token_data = decode::<Claims>(token, &keys.decoding_key, &self.validation)
            .map_err(|e| DomainError::Token(map_decode_error(e.kind())))?;
        let claims = token_data.claims;

        if claims.kind != kind {
            return Err(DomainError::Token(TokenError::InvalidClaims));
        }
        if claims.is_expired_at(now, self.leeway) {
            return Err(DomainError::Token(TokenError::TokenExpired));
        }
        if claims.is_immature_at(now, self.leeway) {
            return Err(DomainError::Token(TokenError::TokenNotYetValid));
        }

        Ok(claims)
    }
}

fn map_decode_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
        ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::InvalidSubject
        | ErrorKind::MissingRequiredClaim(_) => TokenError::InvalidClaims,
        _ => TokenError::InvalidTokenFormat,
    }
}
