use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
    pub expires_at: DateTime<Utc>,
}

/// JWT token handler for issuing and verifying access tokens.
///
/// Holds the process-wide signing secret and token validity. Immutable after
/// construction; share it behind an `Arc`. Rotating the secret means building
/// a new handler, which invalidates every token issued by the old one.
/// Uses HS256 (HMAC with SHA-256).
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validity: Duration,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (arbitrary bytes)
    /// * `validity` - How long an issued token stays valid
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], validity: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            validity,
        }
    }

    /// Configured token lifetime.
    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Issue a token for `subject` at instant `now`.
    ///
    /// # Arguments
    /// * `subject` - Identity the token asserts
    /// * `now` - Issuance instant; expiry is `now + validity`
    ///
    /// # Returns
    /// Signed token string with its claims
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry is not representable, or token encoding failed
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<IssuedToken, JwtError> {
        let expires_at = now.checked_add_signed(self.validity).ok_or_else(|| {
            JwtError::EncodingFailed(format!(
                "expiry out of range: {} + {}s",
                now,
                self.validity.num_seconds()
            ))
        })?;

        let claims = Claims::new(subject, now, expires_at);
        let header = Header::new(self.algorithm);

        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        Ok(IssuedToken {
            token,
            claims,
            expires_at,
        })
    }

    /// Issue a token for `subject` at the current wall-clock time.
    pub fn issue_now(&self, subject: &str) -> Result<IssuedToken, JwtError> {
        self.issue(subject, Utc::now())
    }

    /// Verify a token at instant `now` and return its claims.
    ///
    /// Pure function of the token, `now` and the secret. The signature is
    /// checked before the payload is interpreted, so a tampered payload is
    /// reported as a signature mismatch.
    ///
    /// # Arguments
    /// * `token` - JWT token string to verify
    /// * `now` - Instant to compare against the expiry
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed into the expected shape
    /// * `SignatureMismatch` - Signature was not produced by this secret
    /// * `Expired` - Signature is valid but `now >= exp`
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the supplied instant, not the system clock.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        let claims = token_data.claims;

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }

    /// Verify a token at the current wall-clock time.
    pub fn verify_now(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify(token, Utc::now())
    }
}
