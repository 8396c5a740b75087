// src/models/fair.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'fairs' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Fair {
    #[serde(rename = "id_feria")]
    pub id: i64,

    #[serde(rename = "titulo")]
    pub title: String,

    #[serde(rename = "descripcion")]
    pub description: String,

    /// Opaque start date as supplied by the client.
    #[serde(rename = "fecha_inicio")]
    pub start_date: String,

    /// Owning user.
    #[serde(rename = "id_usuario")]
    pub user_id: i64,

    #[serde(
        rename = "foto_feria",
        default,
        serialize_with = "super::empty_if_none"
    )]
    pub photo_url: Option<String>,
}

/// Text fields of the fair create/update form.
#[derive(Debug, Clone, Validate)]
pub struct FairForm {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters."))]
    pub title: String,
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters."))]
    pub description: String,
    #[validate(length(max = 50, message = "Start date must be at most 50 characters."))]
    pub start_date: String,
    pub user_id: i64,
}

/// Column values for a fair insert or update.
#[derive(Debug, Clone)]
pub struct NewFair {
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub user_id: i64,
    pub photo_url: Option<String>,
}

impl NewFair {
    pub fn from_form(form: FairForm, photo_url: Option<String>) -> Self {
        Self {
            title: form.title,
            description: form.description,
            start_date: form.start_date,
            user_id: form.user_id,
            photo_url,
        }
    }
}
