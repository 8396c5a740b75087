// src/repositories/preference.rs

use async_trait::async_trait;
use sqlx::PgPool;

use super::is_unique_violation;
use crate::{
    error::AppError,
    models::preference::{Preference, PreferenceRequest},
};

#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    async fn find_by_user(&self, user_id: i64) -> Result<Option<Preference>, AppError>;
    async fn create(&self, links: &PreferenceRequest) -> Result<Preference, AppError>;
    /// Overwrites the three links of the user's row, `None` if there is no row.
    async fn update(&self, links: &PreferenceRequest) -> Result<Option<Preference>, AppError>;
}

pub struct PgPreferenceRepository {
    pool: PgPool,
}

impl PgPreferenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceRepository for PgPreferenceRepository {
    async fn find_by_user(&self, user_id: i64) -> Result<Option<Preference>, AppError> {
        let pref = sqlx::query_as::<_, Preference>(
            r#"
            SELECT id, user_id, linkedin, instagram, x_link
            FROM preferences
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(pref)
    }

    async fn create(&self, links: &PreferenceRequest) -> Result<Preference, AppError> {
        sqlx::query_as::<_, Preference>(
            r#"
            INSERT INTO preferences (user_id, linkedin, instagram, x_link)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, linkedin, instagram, x_link
            "#,
        )
        .bind(links.user_id)
        .bind(&links.linkedin)
        .bind(&links.instagram)
        .bind(&links.x_link)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::Conflict(format!(
                    "Preferences for user {} already exist",
                    links.user_id
                ));
            }
            tracing::error!("Failed to insert preferences: {:?}", e);
            AppError::from(e)
        })
    }

    async fn update(&self, links: &PreferenceRequest) -> Result<Option<Preference>, AppError> {
        sqlx::query_as::<_, Preference>(
            r#"
            UPDATE preferences
            SET linkedin = $1, instagram = $2, x_link = $3
            WHERE user_id = $4
            RETURNING id, user_id, linkedin, instagram, x_link
            "#,
        )
        .bind(&links.linkedin)
        .bind(&links.instagram)
        .bind(&links.x_link)
        .bind(links.user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update preferences: {:?}", e);
            AppError::from(e)
        })
    }
}
