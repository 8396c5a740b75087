// src/services/fair.rs

use std::sync::Arc;

use crate::{
    error::AppError,
    media::{self, ImageHost},
    models::fair::{Fair, FairForm, NewFair},
    repositories::{FairRepository, UserRepository},
};

pub struct FairService {
    fairs: Arc<dyn FairRepository>,
    users: Arc<dyn UserRepository>,
    images: Arc<dyn ImageHost>,
}

impl FairService {
    pub fn new(
        fairs: Arc<dyn FairRepository>,
        users: Arc<dyn UserRepository>,
        images: Arc<dyn ImageHost>,
    ) -> Self {
        Self {
            fairs,
            users,
            images,
        }
    }

    async fn ensure_owner(&self, user_id: i64) -> Result<(), AppError> {
        if self.users.exists(user_id).await? {
            Ok(())
        } else {
            Err(AppError::UserNotFound(user_id))
        }
    }

    /// Creates a fair. The id is reserved up front so a photo can be stored
    /// under it before the row exists; readers never see a fair whose upload
    /// is still pending or has failed.
    pub async fn create(&self, form: FairForm, photo: Option<Vec<u8>>) -> Result<Fair, AppError> {
        self.ensure_owner(form.user_id).await?;

        let id = self.fairs.reserve_id().await?;

        let photo_url = match photo {
            Some(bytes) => Some(
                self.images
                    .upload(bytes, media::FAIR_FOLDER, &media::fair_photo_id(id), true)
                    .await
                    .inspect_err(|_| tracing::warn!("Photo upload for fair {} failed", id))?,
            ),
            None => None,
        };

        self.fairs
            .create(id, &NewFair::from_form(form, photo_url))
            .await
    }

    /// Overwrites every field. Without a new photo the stored photo URL is
    /// cleared to `""`.
    pub async fn update(
        &self,
        id: i64,
        form: FairForm,
        photo: Option<Vec<u8>>,
    ) -> Result<Fair, AppError> {
        if self.fairs.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Fair not found".to_string()));
        }
        self.ensure_owner(form.user_id).await?;

        let photo_url = match photo {
            Some(bytes) => Some(
                self.images
                    .upload(bytes, media::FAIR_FOLDER, &media::fair_photo_id(id), true)
                    .await?,
            ),
            None => None,
        };

        self.fairs
            .update(id, &NewFair::from_form(form, photo_url))
            .await?
            .ok_or_else(|| AppError::NotFound("Fair not found".to_string()))
    }

    /// Deleting a missing fair is not an error.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.fairs.delete(id).await?;
        if deleted == 0 {
            tracing::debug!("Delete of fair {} matched no rows", id);
        }
        Ok(())
    }

    pub async fn get(&self, id: i64) -> Result<Fair, AppError> {
        self.fairs
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Fair not found".to_string()))
    }

    pub async fn list_all(&self) -> Result<Vec<Fair>, AppError> {
        self.fairs.list_all().await
    }
}
