// src/repositories/user.rs

use async_trait::async_trait;
use sqlx::PgPool;

use super::is_unique_violation;
use crate::{
    error::AppError,
    models::user::{NewUser, ProfileChanges, User},
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user and returns the stored row.
    async fn create(&self, user: &NewUser) -> Result<User, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn exists(&self, id: i64) -> Result<bool, AppError>;
    /// Returns `None` when no user has this id.
    async fn update_profile(
        &self,
        id: i64,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, AppError>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, occupation, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, occupation, email, password_hash, photo_url
            "#,
        )
        .bind(&user.name)
        .bind(&user.occupation)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::Conflict(format!("Email '{}' is already registered", user.email));
            }
            tracing::error!("Failed to insert user: {:?}", e);
            AppError::from(e)
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, occupation, email, password_hash, photo_url
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, occupation, email, password_hash, photo_url
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Login DB error: {:?}", e);
            AppError::from(e)
        })?;

        Ok(user)
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn update_profile(
        &self,
        id: i64,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, AppError> {
        // The photo column is only part of the statement when a new upload exists.
        let query = match &changes.photo_url {
            Some(photo_url) => sqlx::query_as::<_, User>(
                r#"
                UPDATE users
                SET name = $1, occupation = $2, email = $3, photo_url = $4
                WHERE id = $5
                RETURNING id, name, occupation, email, password_hash, photo_url
                "#,
            )
            .bind(&changes.name)
            .bind(&changes.occupation)
            .bind(&changes.email)
            .bind(photo_url)
            .bind(id),
            None => sqlx::query_as::<_, User>(
                r#"
                UPDATE users
                SET name = $1, occupation = $2, email = $3
                WHERE id = $4
                RETURNING id, name, occupation, email, password_hash, photo_url
                "#,
            )
            .bind(&changes.name)
            .bind(&changes.occupation)
            .bind(&changes.email)
            .bind(id),
        };

        query.fetch_optional(&self.pool).await.map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::Conflict(format!("Email '{}' is already registered", changes.email));
            }
            tracing::error!("Failed to update user {}: {:?}", id, e);
            AppError::from(e)
        })
    }
}
