// src/repositories/fair.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::fair::{Fair, NewFair},
};

#[async_trait]
pub trait FairRepository: Send + Sync {
    /// Takes the next id from the fairs sequence without inserting a row.
    async fn reserve_id(&self) -> Result<i64, AppError>;
    /// Inserts a fair under an id obtained from `reserve_id`.
    async fn create(&self, id: i64, fair: &NewFair) -> Result<Fair, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Fair>, AppError>;
    async fn list_all(&self) -> Result<Vec<Fair>, AppError>;
    /// Overwrites every column. A missing photo URL is stored as `""`.
    async fn update(&self, id: i64, fair: &NewFair) -> Result<Option<Fair>, AppError>;
    /// Returns the number of deleted rows.
    async fn delete(&self, id: i64) -> Result<u64, AppError>;
}

pub struct PgFairRepository {
    pool: PgPool,
}

impl PgFairRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FairRepository for PgFairRepository {
    async fn reserve_id(&self) -> Result<i64, AppError> {
        let id: i64 = sqlx::query_scalar("SELECT nextval(pg_get_serial_sequence('fairs', 'id'))")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to reserve fair id: {:?}", e);
                AppError::from(e)
            })?;

        Ok(id)
    }

    async fn create(&self, id: i64, fair: &NewFair) -> Result<Fair, AppError> {
        sqlx::query_as::<_, Fair>(
            r#"
            INSERT INTO fairs (id, title, description, start_date, user_id, photo_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, start_date, user_id, photo_url
            "#,
        )
        .bind(id)
        .bind(&fair.title)
        .bind(&fair.description)
        .bind(&fair.start_date)
        .bind(fair.user_id)
        .bind(&fair.photo_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert fair: {:?}", e);
            AppError::from(e)
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Fair>, AppError> {
        let fair = sqlx::query_as::<_, Fair>(
            r#"
            SELECT id, title, description, start_date, user_id, photo_url
            FROM fairs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(fair)
    }

    async fn list_all(&self) -> Result<Vec<Fair>, AppError> {
        let fairs = sqlx::query_as::<_, Fair>(
            r#"
            SELECT id, title, description, start_date, user_id, photo_url
            FROM fairs
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list fairs: {:?}", e);
            AppError::from(e)
        })?;

        Ok(fairs)
    }

    async fn update(&self, id: i64, fair: &NewFair) -> Result<Option<Fair>, AppError> {
        sqlx::query_as::<_, Fair>(
            r#"
            UPDATE fairs
            SET title = $1, description = $2, start_date = $3, user_id = $4, photo_url = $5
            WHERE id = $6
            RETURNING id, title, description, start_date, user_id, photo_url
            "#,
        )
        .bind(&fair.title)
        .bind(&fair.description)
        .bind(&fair.start_date)
        .bind(fair.user_id)
        .bind(fair.photo_url.as_deref().unwrap_or(""))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update fair {}: {:?}", id, e);
            AppError::from(e)
        })
    }

    async fn delete(&self, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM fairs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete fair {}: {:?}", id, e);
                AppError::from(e)
            })?;

        Ok(result.rows_affected())
    }
}
