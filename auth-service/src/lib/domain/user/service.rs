use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenCodec;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Password;
use crate::domain::user::models::Profile;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::AuthError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::ProfileRepository;
use crate::user::ports::UserRepository;

/// Authentication domain service.
///
/// Orchestrates registration and login against the identity store and the
/// token codec. The codec is shared with the access interceptor so both
/// sides of the token lifecycle use the same secret.
pub struct AuthService<UR, PR>
where
    UR: UserRepository,
    PR: ProfileRepository,
{
    users: Arc<UR>,
    profiles: Arc<PR>,
    password_hasher: PasswordHasher,
    token_codec: Arc<TokenCodec>,
}

impl<UR, PR> AuthService<UR, PR>
where
    UR: UserRepository,
    PR: ProfileRepository,
{
    pub fn new(users: Arc<UR>, profiles: Arc<PR>, token_codec: Arc<TokenCodec>) -> Self {
        Self {
            users,
            profiles,
            password_hasher: PasswordHasher::new(),
            token_codec,
        }
    }

    fn issue_token(&self, username: &str, id: UserId) -> Result<String, AuthError> {
        Ok(self.token_codec.generate(username, id.as_u64())?)
    }
}

#[async_trait]
impl<UR, PR> AuthServicePort for AuthService<UR, PR>
where
    UR: UserRepository,
    PR: ProfileRepository,
{
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let username = Username::new(username.to_owned())?;
        let email = EmailAddress::new(email.to_owned())?;
        let password = Password::new(password.to_owned())?;

        // Pre-checks, account name first. The store's unique constraints
        // remain the authoritative guard against concurrent registrations.
        if self.users.username_exists(username.as_str()).await? {
            return Err(AuthError::UsernameAlreadyExists);
        }
        if self.users.email_exists(email.as_str()).await? {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = self
            .password_hasher
            .hash(password.as_str())
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        let user = self
            .users
            .create(NewUser {
                username,
                email,
                password_hash,
            })
            .await?;

        // The companion profile must exist for every identity. On failure,
        // remove the identity again so registration leaves no orphan.
        if let Err(e) = self.profiles.create(user.id, user.username.as_str()).await {
            tracing::error!(
                user_id = %user.id,
                error = %e,
                "Profile creation failed, rolling back identity"
            );
            if let Err(delete_err) = self.users.delete(user.id).await {
                tracing::error!(
                    user_id = %user.id,
                    error = %delete_err,
                    "Failed to roll back identity after profile failure"
                );
            }
            return Err(e);
        }

        let token = self.issue_token(user.username.as_str(), user.id)?;

        Ok(AuthSession { user, token })
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthSession, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        // Unknown account and wrong password are indistinguishable to the
        // caller.
        let user = match self.users.find_by_username(username).await? {
            Some(user) => user,
            None => return Err(AuthError::InvalidCredentials),
        };

        let is_valid = self
            .password_hasher
            .verify(password, &user.password_hash)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_token(user.username.as_str(), user.id)?;

        Ok(AuthSession { user, token })
    }

    async fn get_profile(&self, user_id: UserId) -> Result<Profile, AuthError> {
        self.profiles
            .find_by_user_id(user_id)
            .await?
            .ok_or(AuthError::ProfileNotFound)
    }
}
