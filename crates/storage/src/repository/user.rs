use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::auth::OauthProfile;
use crate::error::{Result, StorageError};
use crate::models::User;

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find the user linked to an OAuth account
    pub async fn find_by_account(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.name, u.username, u.email, u.image, u.created_at
            FROM users u
            JOIN accounts a ON a.user_id = u.id
            WHERE a.provider = $1 AND a.provider_account_id = $2
            "#,
        )
        .bind(provider)
        .bind(provider_account_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, username, email, image, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(user)
    }

    /// Create the user and its provider account link in one transaction
    pub async fn create_from_oauth(&self, profile: &OauthProfile) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, username, email, image)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, username, email, image, created_at
            "#,
        )
        .bind(&profile.name)
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(&profile.image)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO accounts (user_id, provider, provider_account_id)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user.id)
        .bind(&profile.provider)
        .bind(&profile.provider_account_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(user)
    }

    /// Overwrite the provider-owned profile fields on re-login
    pub async fn refresh_profile(&self, id: Uuid, profile: &OauthProfile) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, username = $3, email = $4, image = $5
            WHERE id = $1
            RETURNING id, name, username, email, image, created_at
            "#,
        )
        .bind(id)
        .bind(&profile.name)
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(&profile.image)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(user)
    }
}
