use std::sync::Arc;

use async_trait::async_trait;
use auth::JwtHandler;
use auth::PasswordHasher;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserView;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for account operations.
///
/// Ties the user store, the password hasher and the token handler together.
/// All collaborators are injected; nothing is looked up globally.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: Arc<PasswordHasher>,
    jwt_handler: Arc<JwtHandler>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Credential hasher
    /// * `jwt_handler` - Access token issuer/verifier
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(
        repository: Arc<UR>,
        password_hasher: Arc<PasswordHasher>,
        jwt_handler: Arc<JwtHandler>,
    ) -> Self {
        Self {
            repository,
            password_hasher,
            jwt_handler,
        }
    }

    fn open_session(&self, user: &User, now: DateTime<Utc>) -> Result<AuthSession, UserError> {
        let issued = self.jwt_handler.issue(user.email.as_str(), now)?;

        Ok(AuthSession {
            user: UserView::from(user),
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, UserError> {
        if self.repository.exists_by_email(&command.email).await? {
            tracing::warn!(email = %command.email, "Registration rejected: email already registered");
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            username: command.username,
            phone: command.phone,
            address: command.address,
            created_at: now,
            updated_at: now,
        };

        // A concurrent registration can still win between the check and the
        // insert; the store reports that as EmailAlreadyExists.
        let saved = self.repository.save(user).await?;
        let session = self.open_session(&saved, now)?;

        tracing::info!(user_id = %saved.id, email = %saved.email, "User registered");

        Ok(session)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError> {
        let user = match self.repository.find_by_email(&command.email).await? {
            Some(user) => user,
            None => {
                tracing::warn!(email = %command.email, "Login rejected: unknown email");
                return Err(UserError::NotFound(command.email.to_string()));
            }
        };

        if !self
            .password_hasher
            .verify(&command.password, &user.password_hash)
        {
            tracing::warn!(user_id = %user.id, "Login rejected: invalid credentials");
            return Err(UserError::InvalidCredentials);
        }

        let session = self.open_session(&user, Utc::now())?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(session)
    }

    async fn get_profile(&self, email: &EmailAddress) -> Result<UserView, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .map(|user| UserView::from(&user))
            .ok_or(UserError::NotFound(email.to_string()))
    }
}
