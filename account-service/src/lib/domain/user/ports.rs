use async_trait::async_trait;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserView;
use crate::user::errors::UserError;

/// Port for account service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new account and open a session for it.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email, password, username and optional profile
    ///
    /// # Returns
    /// Session holding the created user's view and a fresh access token
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Password hashing failed
    /// * `Token` - Token issuing failed
    /// * `StoreUnavailable` - Storage operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, UserError>;

    /// Check credentials and open a session.
    ///
    /// # Arguments
    /// * `command` - Email and plaintext password
    ///
    /// # Returns
    /// Session holding the user's view and a fresh access token
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `Token` - Token issuing failed
    /// * `StoreUnavailable` - Storage operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError>;

    /// Look up the profile of an authenticated account.
    ///
    /// # Arguments
    /// * `email` - Subject of a verified access token
    ///
    /// # Errors
    /// * `NotFound` - Account no longer exists
    /// * `StoreUnavailable` - Storage operation failed
    async fn get_profile(&self, email: &EmailAddress) -> Result<UserView, UserError>;
}

/// Persistence operations for user aggregate.
///
/// Implementations are keyed by normalised email and must enforce its
/// uniqueness themselves: `save` is the last line of defence against two
/// concurrent registrations of the same address.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Check whether an account with this email exists.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Storage operation failed
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `StoreUnavailable` - Storage operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User entity to insert
    ///
    /// # Returns
    /// Stored user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `StoreUnavailable` - Storage operation failed
    async fn save(&self, user: User) -> Result<User, UserError>;
}
