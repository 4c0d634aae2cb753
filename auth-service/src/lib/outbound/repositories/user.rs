use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::AuthError;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: &PgRow) -> Result<User, AuthError> {
    let id: i64 = row.try_get("id").map_err(db_error)?;
    let username: String = row.try_get("username").map_err(db_error)?;
    let email: String = row.try_get("email").map_err(db_error)?;
    let password_hash: String = row.try_get("password_hash").map_err(db_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(db_error)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(db_error)?;

    Ok(User {
        id: UserId(id),
        username: Username::new(username)?,
        email: EmailAddress::new(email)?,
        password_hash,
        created_at,
        updated_at,
    })
}

fn db_error(error: sqlx::Error) -> AuthError {
    AuthError::Database(error.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, AuthError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, created_at, updated_at
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // A unique conflict always confirms non-uniqueness, it is never
            // surfaced as a generic failure.
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("users_username_key") {
                        return AuthError::UsernameAlreadyExists;
                    }
                    if db_err.constraint() == Some("users_email_key") {
                        return AuthError::EmailAlreadyExists;
                    }
                }
            }
            AuthError::Database(e.to_string())
        })?;

        Ok(User {
            id: UserId(row.try_get("id").map_err(db_error)?),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: row.try_get("created_at").map_err(db_error)?,
            updated_at: row.try_get("updated_at").map_err(db_error)?,
        })
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AuthError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        row.try_get(0).map_err(db_error)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        row.try_get(0).map_err(db_error)
    }

    async fn delete(&self, id: UserId) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
