// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "id_usuario")]
    pub id: i64,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "ocupacion")]
    pub occupation: String,

    /// Login key, unique across users.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password_hash: String,

    /// Public URL of the uploaded profile photo.
    #[serde(
        rename = "foto_perfil",
        default,
        serialize_with = "super::empty_if_none"
    )]
    pub photo_url: Option<String>,
}

/// DTO for creating a new user (Registration).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters."))]
    pub name: String,

    #[serde(rename = "ocupacion", default)]
    #[validate(length(max = 100, message = "Occupation must be at most 100 characters."))]
    pub occupation: String,

    #[serde(rename = "contraseña", alias = "password")]
    #[validate(length(min = 1, max = 128, message = "Password must be between 1 and 128 characters."))]
    pub password: String,

    #[validate(email(message = "Email is not valid."))]
    pub email: String,
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[serde(alias = "contraseña")]
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Login result: the signed token plus the authenticated user.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Row data for inserting a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub occupation: String,
    pub email: String,
    pub password_hash: String,
}

/// Text fields of the profile update form.
#[derive(Debug, Clone, Validate)]
pub struct UpdateProfileForm {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters."))]
    pub name: String,
    #[validate(length(max = 100, message = "Occupation must be at most 100 characters."))]
    pub occupation: String,
    #[validate(email(message = "Email is not valid."))]
    pub email: String,
}

/// Column values written by a profile update.
/// `photo_url: None` leaves the stored photo untouched.
#[derive(Debug, Clone)]
pub struct ProfileChanges {
    pub name: String,
    pub occupation: String,
    pub email: String,
    pub photo_url: Option<String>,
}
