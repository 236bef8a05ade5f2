//! Stateless bearer-token authentication.
//!
//! - Password hashing (Argon2id)
//! - Signed, expiring access tokens (HS256 JWT) bound to an identity
//! - Token issuance at login and validation on every request
//!
//! Nothing here stores sessions: a token is valid when its signature verifies,
//! it has not expired at the caller-supplied `now`, and its subject matches
//! the identity it is checked against. Services supply identities from their
//! own credential store and decide what an anonymous request may do.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Issue and validate
//! ```
//! use std::sync::Arc;
//!
//! use auth::{DecodeError, Identity, SigningKey, TokenCodec, TokenIssuer, TokenValidator};
//! use auth::ValidationError;
//!
//! let key = SigningKey::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let codec = Arc::new(TokenCodec::new(&key));
//! let issuer = TokenIssuer::new(Arc::clone(&codec), chrono::Duration::seconds(3600)).unwrap();
//! let validator = TokenValidator::new(codec);
//!
//! let alice = Identity::new("alice@example.com", "$argon2id$...", ["ROLE_USER"]);
//! let issued = issuer.issue(&alice, 1000).unwrap();
//!
//! assert!(validator.is_valid(&issued.token, &alice, 4000));
//! assert_eq!(
//!     validator.validate(&issued.token, &alice, 4700),
//!     Err(ValidationError::Decode(DecodeError::Expired { expired_at: 4600 }))
//! );
//! ```
//!
//! ## Login
//! ```
//! use std::sync::Arc;
//!
//! use auth::{Authenticator, Identity, SigningKey, TokenCodec, TokenIssuer};
//!
//! let key = SigningKey::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let codec = Arc::new(TokenCodec::new(&key));
//! let issuer = TokenIssuer::new(codec, chrono::Duration::hours(24)).unwrap();
//! let authenticator = Authenticator::new(Arc::new(issuer));
//!
//! let hash = authenticator.hash_password("password123").unwrap();
//! let alice = Identity::new("alice@example.com", hash, ["ROLE_USER"]);
//!
//! let issued = authenticator.authenticate("password123", &alice, 1000).unwrap();
//! println!("Token: {}", issued.token);
//! ```

pub mod authenticator;
pub mod identity;
pub mod issuer;
pub mod password;
pub mod token;
pub mod validator;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use identity::Authority;
pub use identity::Identity;
pub use issuer::IssuedToken;
pub use issuer::IssuerError;
pub use issuer::TokenIssuer;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::DecodeError;
pub use token::EncodeError;
pub use token::KeyError;
pub use token::SigningKey;
pub use token::TokenCodec;
pub use validator::TokenValidator;
pub use validator::ValidationError;
