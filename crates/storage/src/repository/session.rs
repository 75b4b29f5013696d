use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Session, User};
use crate::repository::user::UserRepository;

pub struct SessionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SessionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a session for the user with a fresh random token
    pub async fn create(&self, user_id: Uuid, ttl: Duration) -> Result<Session> {
        let token = Uuid::new_v4().simple().to_string();
        let expires_at = Utc::now() + ttl;

        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING token, user_id, expires_at, created_at
            "#,
        )
        .bind(&token)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(self.pool)
        .await?;

        Ok(session)
    }

    /// Resolve a session token to its session and user.
    ///
    /// Expired sessions are deleted on the spot and reported as `NotFound`,
    /// same as tokens that never existed.
    pub async fn find_valid(&self, token: &str) -> Result<(Session, User)> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT token, user_id, expires_at, created_at FROM sessions WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        if session.is_expired(Utc::now()) {
            self.delete(token).await?;
            return Err(StorageError::NotFound);
        }

        let user = UserRepository::new(self.pool)
            .find_by_id(session.user_id)
            .await?;

        Ok((session, user))
    }

    /// Delete a session by token. Deleting an absent token is not an error,
    /// so logout stays idempotent.
    pub async fn delete(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
