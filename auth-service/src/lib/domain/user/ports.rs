use async_trait::async_trait;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Profile;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;

/// Port for the authentication domain service.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new identity and issue a token for it.
    ///
    /// # Errors
    /// * `MissingFields` - an input is empty
    /// * `InvalidUsername` / `InvalidEmail` / `WeakPassword` - shape checks
    /// * `UsernameAlreadyExists` / `EmailAlreadyExists` - uniqueness
    /// * `Database` / `Hashing` / `Token` - infrastructure
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError>;

    /// Authenticate an existing identity and issue a token for it.
    ///
    /// # Errors
    /// * `MissingCredentials` - an input is empty
    /// * `InvalidCredentials` - unknown username or wrong password
    /// * `Database` / `Hashing` / `Token` - infrastructure
    async fn login(&self, username: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Retrieve the companion profile of an identity.
    ///
    /// # Errors
    /// * `ProfileNotFound` - no profile for this identity
    /// * `Database` - store failure
    async fn get_profile(&self, user_id: UserId) -> Result<Profile, AuthError>;
}

/// Persistence operations for the identity aggregate.
///
/// The underlying store enforces username and email uniqueness
/// authoritatively; `create` reports a constraint conflict as the matching
/// duplicate error, never as a generic failure.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new identity and return it with its assigned handle.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` / `EmailAlreadyExists` - unique conflict
    /// * `Database` - store failure
    async fn create(&self, user: NewUser) -> Result<User, AuthError>;

    /// Retrieve an identity by account name.
    ///
    /// # Errors
    /// * `Database` - store failure
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError>;

    /// Check whether an identity with this account name exists.
    async fn username_exists(&self, username: &str) -> Result<bool, AuthError>;

    /// Check whether an identity with this email exists.
    async fn email_exists(&self, email: &str) -> Result<bool, AuthError>;

    /// Remove an identity. Used only to roll back a registration whose
    /// companion profile creation failed.
    async fn delete(&self, id: UserId) -> Result<(), AuthError>;
}

/// Persistence operations for companion profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync + 'static {
    /// Create the companion profile for an identity.
    async fn create(&self, user_id: UserId, display_name: &str) -> Result<(), AuthError>;

    /// Retrieve the profile of an identity.
    async fn find_by_user_id(&self, user_id: UserId) -> Result<Option<Profile>, AuthError>;
}
