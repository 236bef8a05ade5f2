use std::sync::Arc;

use thiserror::Error;

use crate::identity::Identity;
use crate::token::Claims;
use crate::token::DecodeError;
use crate::token::TokenCodec;

/// Why a token does not authorize acting as a given identity.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Token subject does not match the identity")]
    SubjectMismatch,
}

impl ValidationError {
    /// Short, stable label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::Decode(err) => err.kind(),
            ValidationError::SubjectMismatch => "subject_mismatch",
        }
    }
}

/// Decides whether presented tokens are trustworthy.
///
/// Stateless apart from the shared codec, so one instance serves every
/// request concurrently.
pub struct TokenValidator {
    codec: Arc<TokenCodec>,
}

impl TokenValidator {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// Verify the token and return whom it names, without checking that
    /// against any identity.
    ///
    /// Used to find out which identity to look up. Never panics on hostile
    /// input; every failure comes back as a `DecodeError`.
    pub fn extract_subject(&self, token: &str, now: i64) -> Result<String, DecodeError> {
        self.codec.decode(token, now).map(|claims| claims.sub)
    }

    /// Verify the token and check it was issued to `identity`.
    ///
    /// # Errors
    /// * `Decode` - Malformed, bad signature or expired at `now`
    /// * `SubjectMismatch` - Valid token, but for another identity
    pub fn validate(
        &self,
        token: &str,
        identity: &Identity,
        now: i64,
    ) -> Result<Claims, ValidationError> {
        let claims = self.codec.decode(token, now)?;

        if claims.subject() != identity.identifier() {
            return Err(ValidationError::SubjectMismatch);
        }

        Ok(claims)
    }

    pub fn is_valid(&self, token: &str, identity: &Identity, now: i64) -> bool {
        self.validate(token, identity, now).is_ok()
    }
}
