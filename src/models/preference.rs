// src/models/preference.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use url::Url;

use crate::error::AppError;

/// Represents the 'preferences' table in the database.
/// At most one row per user.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Preference {
    #[serde(rename = "id_pref")]
    pub id: i64,

    #[serde(rename = "id_usuario")]
    pub user_id: i64,

    #[serde(rename = "linkedinlink", default, serialize_with = "super::empty_if_none")]
    pub linkedin: Option<String>,

    #[serde(rename = "instagramlink", default, serialize_with = "super::empty_if_none")]
    pub instagram: Option<String>,

    #[serde(rename = "xlink", default, serialize_with = "super::empty_if_none")]
    pub x_link: Option<String>,
}

/// DTO for creating or updating a user's social links.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceRequest {
    #[serde(rename = "id_usuario")]
    pub user_id: i64,

    #[serde(rename = "linkedinlink", default)]
    pub linkedin: Option<String>,

    #[serde(rename = "instagramlink", default)]
    pub instagram: Option<String>,

    #[serde(rename = "xlink", default)]
    pub x_link: Option<String>,
}

impl PreferenceRequest {
    /// Treats blank links as absent and checks the rest are URLs.
    pub fn normalized(self) -> Result<Self, AppError> {
        Ok(Self {
            user_id: self.user_id,
            linkedin: normalize_link("linkedinlink", self.linkedin)?,
            instagram: normalize_link("instagramlink", self.instagram)?,
            x_link: normalize_link("xlink", self.x_link)?,
        })
    }
}

/// Outcome of an upsert: which branch ran decides the status code.
#[derive(Debug, Clone, PartialEq)]
pub enum Upserted {
    Created(Preference),
    Updated(Preference),
}

fn normalize_link(field: &str, link: Option<String>) -> Result<Option<String>, AppError> {
    let Some(link) = link.map(|l| l.trim().to_string()).filter(|l| !l.is_empty()) else {
        return Ok(None);
    };
    if link.len() > 500 {
        return Err(AppError::BadRequest(format!("{} is too long", field)));
    }
    match Url::parse(&link) {
        Ok(_) => Ok(Some(link)),
        // `linkedin.com/in/ana` style links are stored as https.
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let prefixed = format!("https://{}", link);
            match Url::parse(&prefixed) {
                Ok(url) if url.host_str().is_some_and(|h| h.contains('.')) => Ok(Some(prefixed)),
                _ => Err(AppError::BadRequest(format!("{} is not a valid URL", field))),
            }
        }
        Err(_) => Err(AppError::BadRequest(format!("{} is not a valid URL", field))),
    }
}
