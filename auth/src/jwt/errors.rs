use jsonwebtoken::errors::Error as JsonWebTokenError;
use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Error type for JWT operations.
///
/// `Expired`, `Malformed` and `SignatureMismatch` are the three ways a
/// presented token can be rejected. Callers render all of them as
/// "unauthenticated" but keep the kind for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature does not match")]
    SignatureMismatch,
}

impl JwtError {
    /// Short machine-readable name of the rejection kind, for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            JwtError::EncodingFailed(_) => "encoding_failed",
            JwtError::Expired => "expired",
            JwtError::Malformed(_) => "malformed",
            JwtError::SignatureMismatch => "signature_mismatch",
        }
    }
}

impl From<JsonWebTokenError> for JwtError {
    fn from(err: JsonWebTokenError) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => JwtError::SignatureMismatch,
            ErrorKind::ExpiredSignature => JwtError::Expired,
            _ => JwtError::Malformed(err.to_string()),
        }
    }
}
