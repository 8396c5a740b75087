// src/handlers/user.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Multipart, Path, Query, State,
        multipart::MultipartRejection,
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use super::{
    IdQuery,
    form::{FormData, parse_id},
};
use crate::{
    error::AppError,
    models::user::{CreateUserRequest, LoginRequest, UpdateProfileForm},
    services::UserService,
};

/// Authenticates a user and returns a JWT token plus the user record.
pub async fn login(
    State(users): State<Arc<UserService>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let response = users.login(&payload.email, &payload.password).await?;
    tracing::info!("Login successful, user ID: {}", response.user.id);

    Ok(Json(response))
}

/// Registers a new user.
///
/// Returns 201 Created and the user object (excluding password).
pub async fn register(
    State(users): State<Arc<UserService>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = users.register(payload).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(users): State<Arc<UserService>>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(query.id.as_deref(), "user")?;
    let user = users.get_profile(id).await?;

    Ok(Json(user))
}

/// Updates name, occupation and email from a multipart form.
/// An optional `foto_perfil` file replaces the profile photo.
pub async fn update_profile(
    State(users): State<Arc<UserService>>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(Some(id.as_str()), "user")?;
    let mut form = FormData::read(multipart?).await?;

    let profile = UpdateProfileForm {
        name: form.text("nombre"),
        occupation: form.text("ocupacion"),
        email: form.text("email"),
    };
    profile.validate()?;

    let photo = form.take_file("foto_perfil");
    let user = users.update_profile(id, profile, photo).await?;

    Ok(Json(user))
}
