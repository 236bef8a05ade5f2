use thiserror::Error;

/// Error type for password hashing and verification.
///
/// A wrong password is not an error; see `PasswordHasher::verify`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is unusable: {0}")]
    VerificationFailed(String),
}
