use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::DecodeError;
use super::errors::EncodeError;
use super::key::SigningKey;

/// Signs and verifies access tokens.
///
/// Tokens are compact JWTs (`header.claims.signature`, each segment
/// base64url) signed with HS256. The signature comparison is constant time.
///
/// Expiry is not delegated to `jsonwebtoken`: the caller passes `now` so the
/// check is exact (no leeway) and happens only after the signature verified.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec bound to a signing key.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Rotating the key invalidates every outstanding token
    pub fn new(key: &SigningKey) -> Self {
        let algorithm = Algorithm::HS256;

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            algorithm,
            validation,
        }
    }

    /// Encode claims into a signed token string.
    ///
    /// # Errors
    /// * `TimestampOutOfRange` - `iat` or `exp` is before the Unix epoch
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn encode(&self, claims: &Claims) -> Result<String, EncodeError> {
        // Registered time claims are unsigned on the wire
        if let Some(&negative) = [claims.iat, claims.exp].iter().find(|t| **t < 0) {
            return Err(EncodeError::TimestampOutOfRange(negative));
        }

        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// # Arguments
    /// * `token` - Token string as presented by the client
    /// * `now` - Current Unix time in seconds
    ///
    /// # Errors
    /// * `Malformed` - Wrong structure, bad encoding, missing claims or algorithm
    /// * `BadSignature` - Signature does not match the header and claims
    /// * `Expired` - Signature is valid but `now` is past `exp`
    pub fn decode(&self, token: &str, now: i64) -> Result<Claims, DecodeError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        if claims.is_expired(now) {
            return Err(DecodeError::Expired {
                expired_at: claims.exp,
            });
        }

        Ok(claims)
    }
}
