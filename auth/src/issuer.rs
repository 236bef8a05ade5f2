use std::sync::Arc;

use chrono::Duration;
use thiserror::Error;

use crate::identity::Identity;
use crate::token::Claims;
use crate::token::EncodeError;
use crate::token::TokenCodec;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IssuerError {
    #[error("Token time-to-live must be positive, got {0} seconds")]
    NonPositiveTtl(i64),
}

/// A freshly minted access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Mints access tokens for identities that already proved who they are.
pub struct TokenIssuer {
    codec: Arc<TokenCodec>,
    ttl: Duration,
}

impl TokenIssuer {
    /// # Errors
    /// * `NonPositiveTtl` - `ttl` is zero or negative
    pub fn new(codec: Arc<TokenCodec>, ttl: Duration) -> Result<Self, IssuerError> {
        if ttl <= Duration::zero() {
            return Err(IssuerError::NonPositiveTtl(ttl.num_seconds()));
        }
        Ok(Self { codec, ttl })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `identity` valid from `now` until `now + ttl`.
    ///
    /// # Arguments
    /// * `identity` - Authenticated identity; its identifier becomes the subject
    /// * `now` - Current Unix time in seconds
    ///
    /// # Errors
    /// * `TimestampOutOfRange` - `now` is negative or `now + ttl` overflows
    /// * `EncodingFailed` - Token could not be signed
    pub fn issue(&self, identity: &Identity, now: i64) -> Result<IssuedToken, EncodeError> {
        let expires_at = now
            .checked_add(self.ttl.num_seconds())
            .ok_or(EncodeError::TimestampOutOfRange(now))?;
        let claims = Claims::new(identity.identifier(), now, expires_at);

        let token = self.codec.encode(&claims)?;
        tracing::debug!(subject = %identity.identifier(), expires_at, "Token issued");

        Ok(IssuedToken {
            token,
            issued_at: now,
            expires_at,
        })
    }
}
