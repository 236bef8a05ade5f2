use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Reasons a presented token is rejected by the codec.
///
/// `BadSignature` is kept apart from `Malformed` so that tampering attempts
/// can be told apart from garbage input in the logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature does not match")]
    BadSignature,

    #[error("Token expired at {expired_at}")]
    Expired { expired_at: i64 },
}

impl DecodeError {
    /// Short, stable label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::Malformed(_) => "malformed",
            DecodeError::BadSignature => "bad_signature",
            DecodeError::Expired { .. } => "expired",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for DecodeError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => DecodeError::BadSignature,
            _ => DecodeError::Malformed(err.to_string()),
        }
    }
}

/// Error type for token encoding.
#[derive(Debug, Clone, Error)]
pub enum EncodeError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// `iat` or `exp` is negative or `now + ttl` overflowed
    #[error("Token timestamps must be non-negative Unix seconds, got {0}")]
    TimestampOutOfRange(i64),
}

/// Error type for signing key construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Signing key must not be empty")]
    Empty,
}
