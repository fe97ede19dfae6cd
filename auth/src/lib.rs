//! Credential and token primitives
//!
//! Provides the two leaf components of account authentication:
//! - Password hashing (Argon2id, salted, constant-time verification)
//! - Access token issuing and verification (HS256 JWT with expiry)
//!
//! Services wire these into their own orchestration; nothing here touches
//! storage or the network.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{JwtError, JwtHandler};
//! use chrono::{Duration, Utc};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24));
//! let now = Utc::now();
//!
//! let issued = handler.issue("alice@example.com", now).unwrap();
//! let claims = handler.verify(&issued.token, now).unwrap();
//! assert_eq!(claims.subject(), "alice@example.com");
//!
//! let later = now + Duration::hours(24);
//! assert_eq!(handler.verify(&issued.token, later), Err(JwtError::Expired));
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
