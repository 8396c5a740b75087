// src/handlers/mod.rs

use serde::Deserialize;

pub mod fair;
pub mod form;
pub mod preference;
pub mod user;

/// `?id=` query parameter. Kept as text so a malformed value maps to a JSON 400.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}
