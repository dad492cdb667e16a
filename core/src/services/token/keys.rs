//! Per-kind HS256 key material for JWT signing and verification

use chrono::Duration;
use jsonwebtoken::{DecodingKey, EncodingKey};
use nudge_shared::config::auth::{ACCESS_EXPIRES_IN_KEY, REFRESH_EXPIRES_IN_KEY};
use nudge_shared::ConfigError;

use crate::domain::entities::token::TokenKind;

/// Signing material for one token kind
///
/// Each kind owns its secret and lifetime, so compromising one secret
/// says nothing about tokens of the other kind.
#[derive(Clone)]
pub(crate) struct SigningKeys {
    pub(crate) kind: TokenKind,
    pub(crate) encoding_key: EncodingKey,
    pub(crate) decoding_key: DecodingKey,
    pub(crate) lifetime: Duration,
}

impl SigningKeys {
    pub(crate) fn from_secret(
        kind: TokenKind,
        secret: &str,
        lifetime_seconds: i64,
    ) -> Result<Self, ConfigError> {
        let lifetime = Duration::try_seconds(lifetime_seconds).ok_or_else(|| {
            let key = match kind {
                TokenKind::Access => ACCESS_EXPIRES_IN_KEY,
                TokenKind::Refresh => REFRESH_EXPIRES_IN_KEY,
            };
            ConfigError::invalid(key, "lifetime is out of range")
        })?;

        Ok(Self {
            kind,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        })
    }
}

impl std::fmt::Debug for SigningKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeys")
            .field("kind", &self.kind)
            .field("lifetime", &self.lifetime)
            .finish()
    }
}
