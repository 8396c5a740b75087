// src/media/cloudinary.rs

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};

use super::ImageHost;
use crate::{config::CloudinaryConfig, error::AppError};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Signed uploads against the Cloudinary REST API.
pub struct CloudinaryClient {
    http: reqwest::Client,
    config: CloudinaryConfig,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, config })
    }

    fn upload_url(&self) -> String {
        format!("{}/{}/image/upload", API_BASE, self.config.cloud_name)
    }
}

/// Cloudinary request signature: SHA-1 over the alphabetically sorted
/// `key=value` pairs joined by `&`, followed by the API secret.
fn sign(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl ImageHost for CloudinaryClient {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        public_id: &str,
        overwrite: bool,
    ) -> Result<String, AppError> {
        let timestamp = Utc::now().timestamp();

        let params = [
            ("folder", folder.to_string()),
            ("overwrite", overwrite.to_string()),
            ("public_id", public_id.to_string()),
            ("timestamp", timestamp.to_string()),
        ];
        let signature = sign(&params, &self.config.api_secret);

        let mut form = Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature)
            .part("file", Part::bytes(bytes).file_name(public_id.to_string()));
        for (key, value) in params {
            form = form.text(key, value);
        }

        let response = self
            .http
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Image upload request failed: {:?}", e);
                AppError::InternalServerError(format!("Image upload failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(AppError::InternalServerError(format!(
                "Image host rejected upload of {}/{}: {}",
                folder, public_id, message
            )));
        }

        let body = response
            .json::<UploadResponse>()
            .await
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        tracing::info!("Uploaded image {}/{}", folder, public_id);

        body.secure_url
            .or(body.url)
            .ok_or_else(|| AppError::InternalServerError("Image host returned no URL".to_string()))
    }
}
