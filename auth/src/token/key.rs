use std::fmt;

use super::errors::KeyError;

/// Symmetric secret used to sign and verify tokens.
///
/// Read-only once built; share it behind an `Arc` or clone it freely.
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Secrets shorter than this are accepted but weaken HS256.
    pub const RECOMMENDED_LENGTH: usize = 32;

    /// Build a key from raw secret bytes.
    ///
    /// # Errors
    /// * `Empty` - The secret has no bytes
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, KeyError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(KeyError::Empty);
        }
        Ok(Self(secret))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether the secret is at least [`Self::RECOMMENDED_LENGTH`] bytes.
    pub fn is_recommended_length(&self) -> bool {
        self.0.len() >= Self::RECOMMENDED_LENGTH
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey").field(&"<redacted>").finish()
    }
}
