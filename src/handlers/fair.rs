// src/handlers/fair.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, Query, State, multipart::MultipartRejection},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use super::{
    IdQuery,
    form::{FormData, parse_id},
};
use crate::{error::AppError, models::fair::FairForm, services::FairService};

/// Reads the shared create/update form: text fields plus optional `foto_feria`.
async fn read_fair_form(multipart: Multipart) -> Result<(FairForm, Option<Vec<u8>>), AppError> {
    let mut form = FormData::read(multipart).await?;

    let user_id = parse_id(Some(form.text("id_usuario").as_str()), "user")?;
    let fair = FairForm {
        title: form.text("titulo"),
        description: form.text("descripcion"),
        start_date: form.text("fecha_inicio"),
        user_id,
    };
    fair.validate()?;

    Ok((fair, form.take_file("foto_feria")))
}

pub async fn create_fair(
    State(fairs): State<Arc<FairService>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let (form, photo) = read_fair_form(multipart?).await?;
    let fair = fairs.create(form, photo).await?;

    Ok((StatusCode::CREATED, Json(fair)))
}

pub async fn get_fair(
    State(fairs): State<Arc<FairService>>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(query.id.as_deref(), "fair")?;
    let fair = fairs.get(id).await?;

    Ok(Json(fair))
}

pub async fn list_fairs(
    State(fairs): State<Arc<FairService>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(fairs.list_all().await?))
}

pub async fn update_fair(
    State(fairs): State<Arc<FairService>>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(Some(id.as_str()), "fair")?;
    let (form, photo) = read_fair_form(multipart?).await?;
    let fair = fairs.update(id, form, photo).await?;

    Ok(Json(fair))
}

pub async fn delete_fair(
    State(fairs): State<Arc<FairService>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(Some(id.as_str()), "fair")?;
    fairs.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
