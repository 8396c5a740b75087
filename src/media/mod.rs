// src/media/mod.rs

pub mod cloudinary;

use async_trait::async_trait;

use crate::error::AppError;

pub use cloudinary::CloudinaryClient;

/// Where profile photos are stored on the image host.
pub const PROFILE_FOLDER: &str = "profile_pictures";
/// Where fair photos are stored on the image host.
pub const FAIR_FOLDER: &str = "fair_pictures";

/// Remote key of a user's profile photo.
pub fn profile_photo_id(user_id: i64) -> String {
    format!("user_{}", user_id)
}

/// Remote key of a fair's photo.
pub fn fair_photo_id(fair_id: i64) -> String {
    format!("fair_{}", fair_id)
}

/// External image host: stores bytes under `folder/public_id` and returns
/// the public URL of the stored asset.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        public_id: &str,
        overwrite: bool,
    ) -> Result<String, AppError>;
}
