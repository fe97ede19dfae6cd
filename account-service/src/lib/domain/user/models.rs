use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::ProfileError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Represents a registered account. `password_hash` never leaves the domain:
/// anything returned to callers goes through [`UserView`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub username: Username,
    pub phone: Option<PhoneNumber>,
    pub address: Option<PostalAddress>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outward-facing projection of a [`User`], without the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub id: UserId,
    pub email: EmailAddress,
    pub username: Username,
    pub phone: Option<PhoneNumber>,
    pub address: Option<PostalAddress>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Result of a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user: UserView,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Trimmed and lower-cased on construction, so two addresses differing only
/// by case are the same account. Format is checked with an RFC 5322 parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new normalised email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let normalised = email.trim().to_lowercase();

        email_address::EmailAddress::from_str(&normalised)
            .map(|_| EmailAddress(normalised))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Display name, 2-50 characters after trimming. Not unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 50;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 2 characters
    /// * `TooLong` - Username longer than 50 characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = username.trim().to_string();
        let length = username.chars().count();

        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(username))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Optional contact phone number, at most 20 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MAX_LENGTH: usize = 20;

    /// Parse an optional phone number; blank input means "not provided".
    pub fn parse(phone: Option<String>) -> Result<Option<Self>, ProfileError> {
        match non_blank(phone) {
            None => Ok(None),
            Some(phone) => {
                let length = phone.chars().count();
                if length > Self::MAX_LENGTH {
                    Err(ProfileError::PhoneTooLong {
                        max: Self::MAX_LENGTH,
                        actual: length,
                    })
                } else {
                    Ok(Some(Self(phone)))
                }
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Optional delivery address, at most 200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalAddress(String);

impl PostalAddress {
    const MAX_LENGTH: usize = 200;

    /// Parse an optional address; blank input means "not provided".
    pub fn parse(address: Option<String>) -> Result<Option<Self>, ProfileError> {
        match non_blank(address) {
            None => Ok(None),
            Some(address) => {
                let length = address.chars().count();
                if length > Self::MAX_LENGTH {
                    Err(ProfileError::AddressTooLong {
                        max: Self::MAX_LENGTH,
                        actual: length,
                    })
                } else {
                    Ok(Some(Self(address)))
                }
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: String,
    pub username: Username,
    pub phone: Option<PhoneNumber>,
    pub address: Option<PostalAddress>,
}

impl RegisterCommand {
    const MIN_PASSWORD_LENGTH: usize = 6;

    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    /// * `username` - Validated username
    /// * `phone` - Optional phone number
    /// * `address` - Optional delivery address
    ///
    /// # Errors
    /// * `Empty` - Password is empty or whitespace only
    /// * `TooShort` - Password shorter than 6 characters
    pub fn new(
        email: EmailAddress,
        password: String,
        username: Username,
        phone: Option<PhoneNumber>,
        address: Option<PostalAddress>,
    ) -> Result<Self, PasswordPolicyError> {
        if password.trim().is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        let length = password.chars().count();
        if length < Self::MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_PASSWORD_LENGTH,
                actual: length,
            });
        }

        Ok(Self {
            email,
            password,
            username,
            phone,
            address,
        })
    }
}

/// Command to log in with email and password.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl LoginCommand {
    /// Construct a new login command.
    ///
    /// # Errors
    /// * `Empty` - Password is empty or whitespace only
    pub fn new(email: EmailAddress, password: String) -> Result<Self, PasswordPolicyError> {
        if password.trim().is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        Ok(Self { email, password })
    }
}
