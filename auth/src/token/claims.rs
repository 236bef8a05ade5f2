use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an access token.
///
/// Uses the RFC 7519 names on the wire (`sub`, `iat`, `exp`). Timestamps are
/// Unix seconds. All three are required; a token missing any of them does not
/// decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the identity's unique identifier (email)
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration time
    pub exp: i64,
}

impl Claims {
    pub fn new(subject: impl Into<String>, issued_at: i64, expires_at: i64) -> Self {
        Self {
            sub: subject.into(),
            iat: issued_at,
            exp: expires_at,
        }
    }

    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Check if token is expired.
    ///
    /// A token is still valid at exactly its expiration second.
    pub fn is_expired(&self, now: i64) -> bool {
        now > self.exp
    }
}
