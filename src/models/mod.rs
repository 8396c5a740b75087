// src/models/mod.rs

use serde::Serializer;

pub mod fair;
pub mod preference;
pub mod user;

/// Serializes a nullable column as `""` when it holds no value.
pub(crate) fn empty_if_none<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.as_deref().unwrap_or(""))
}
