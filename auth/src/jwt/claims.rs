use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claims carried by an access token.
///
/// All fields are required: a token whose payload lacks any of them does not
/// deserialize and is rejected as malformed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (the identity the token asserts)
    pub sub: String,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// JWT ID (random, keeps tokens issued in the same second distinct)
    pub jti: String,
}

impl Claims {
    /// Create claims for `subject` valid from `issued_at` until `expires_at`.
    ///
    /// # Arguments
    /// * `subject` - Identity the token asserts
    /// * `issued_at` - Issuance instant
    /// * `expires_at` - First instant at which the token is no longer valid
    ///
    /// # Returns
    /// Claims with sub, iat, exp and a fresh jti
    pub fn new(
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Subject as a string slice.
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Check if token is expired at `current_timestamp`.
    ///
    /// A token is only valid strictly before its expiration instant.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
