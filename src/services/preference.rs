// src/services/preference.rs

use std::sync::Arc;

use crate::{
    error::AppError,
    models::preference::{Preference, PreferenceRequest, Upserted},
    repositories::{PreferenceRepository, UserRepository},
};

pub struct PreferenceService {
    preferences: Arc<dyn PreferenceRepository>,
    users: Arc<dyn UserRepository>,
}

impl PreferenceService {
    pub fn new(preferences: Arc<dyn PreferenceRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { preferences, users }
    }

    /// `None` means the user has not saved any links yet.
    pub async fn get_by_user(&self, user_id: i64) -> Result<Option<Preference>, AppError> {
        self.preferences.find_by_user(user_id).await
    }

    pub async fn create(&self, links: PreferenceRequest) -> Result<Preference, AppError> {
        if !self.users.exists(links.user_id).await? {
            return Err(AppError::UserNotFound(links.user_id));
        }
        self.preferences.create(&links).await
    }

    /// Get-or-create keyed by owner: creates the row when absent, otherwise
    /// overwrites the three links and keeps id and owner.
    pub async fn upsert(&self, links: PreferenceRequest) -> Result<Upserted, AppError> {
        if !self.users.exists(links.user_id).await? {
            return Err(AppError::UserNotFound(links.user_id));
        }

        if self.preferences.find_by_user(links.user_id).await?.is_none() {
            match self.preferences.create(&links).await {
                Ok(created) => return Ok(Upserted::Created(created)),
                // Another request created the row after our lookup.
                Err(AppError::Conflict(_)) => {
                    tracing::debug!("Preferences for user {} created concurrently", links.user_id);
                }
                Err(e) => return Err(e),
            }
        }

        let updated = self
            .preferences
            .update(&links)
            .await?
            .ok_or_else(|| AppError::NotFound("Preferences not found".to_string()))?;
        Ok(Upserted::Updated(updated))
    }
}
