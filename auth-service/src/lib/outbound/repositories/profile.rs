use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::Profile;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::ProfileRepository;
use crate::user::errors::AuthError;

pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(error: sqlx::Error) -> AuthError {
    AuthError::Database(error.to_string())
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn create(&self, user_id: UserId, display_name: &str) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, display_name)
            VALUES ($1, $2)
            "#,
        )
        .bind(user_id.0)
        .bind(display_name)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_by_user_id(&self, user_id: UserId) -> Result<Option<Profile>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, display_name, bio, avatar_url, status, last_seen
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        match row {
            Some(row) => Ok(Some(Profile {
                user_id: UserId(row.try_get("user_id").map_err(db_error)?),
                display_name: row.try_get("display_name").map_err(db_error)?,
                bio: row.try_get("bio").map_err(db_error)?,
                avatar_url: row.try_get("avatar_url").map_err(db_error)?,
                status: row.try_get("status").map_err(db_error)?,
                last_seen: row.try_get("last_seen").map_err(db_error)?,
            })),
            None => Ok(None),
        }
    }
}
