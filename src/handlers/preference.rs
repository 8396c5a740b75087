// src/handlers/preference.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{IdQuery, form::parse_id};
use crate::{
    error::AppError,
    models::preference::{PreferenceRequest, Upserted},
    services::PreferenceService,
    utils::jwt::Claims,
};

/// Returns the user's links, or 204 when none are saved.
pub async fn get_preferences(
    State(preferences): State<Arc<PreferenceService>>,
    Query(query): Query<IdQuery>,
) -> Result<Response, AppError> {
    let user_id = parse_id(query.id.as_deref(), "user")?;

    match preferences.get_by_user(user_id).await? {
        Some(pref) => Ok(Json(pref).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Requires a valid token.
pub async fn create_preferences(
    State(preferences): State<Arc<PreferenceService>>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<PreferenceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let links = payload.normalized()?;
    tracing::debug!("User {:?} creating preferences for {}", claims.user_id(), links.user_id);

    let pref = preferences.create(links).await?;

    Ok((StatusCode::CREATED, Json(pref)))
}

/// Requires a valid token. 201 when the row was created, 200 when updated.
pub async fn update_preferences(
    State(preferences): State<Arc<PreferenceService>>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<PreferenceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let links = payload.normalized()?;
    tracing::debug!("User {:?} updating preferences for {}", claims.user_id(), links.user_id);

    let (status, pref) = match preferences.upsert(links).await? {
        Upserted::Created(pref) => (StatusCode::CREATED, pref),
        Upserted::Updated(pref) => (StatusCode::OK, pref),
    };

    Ok((status, Json(pref)))
}
