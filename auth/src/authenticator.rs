use std::sync::Arc;
use std::sync::OnceLock;

use crate::identity::Identity;
use crate::issuer::IssuedToken;
use crate::issuer::TokenIssuer;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::EncodeError;

/// Login coordinator: verifies a password against an identity and, on
/// success, issues an access token for it.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    issuer: Arc<TokenIssuer>,
    decoy_hash: OnceLock<Option<String>>,
}

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-identities";

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] EncodeError),
}

impl Authenticator {
    pub fn new(issuer: Arc<TokenIssuer>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            issuer,
            decoy_hash: OnceLock::new(),
        }
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password presented by the client
    /// * `identity` - Identity the client claims to be
    /// * `now` - Current Unix time in seconds
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be parsed
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        identity: &Identity,
        now: i64,
    ) -> Result<IssuedToken, AuthenticationError> {
        let is_valid = self
            .password_hasher
            .verify(password, identity.password_hash())?;

        if !is_valid {
            tracing::debug!(subject = %identity.identifier(), "Password rejected");
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issuer.issue(identity, now)?)
    }

    /// Fail a login for an identifier with no account.
    ///
    /// Runs one password verification against a decoy hash first, so the
    /// response takes as long as a wrong password for a real account.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        let decoy = self
            .decoy_hash
            .get_or_init(|| self.password_hasher.hash(DECOY_PASSWORD).ok());

        if let Some(hash) = decoy {
            // Outcome is irrelevant, only the work matters
            let _ = self.password_hasher.verify(password, hash);
        }

        AuthenticationError::InvalidCredentials
    }
}
