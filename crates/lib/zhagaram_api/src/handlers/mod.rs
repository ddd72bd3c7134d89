//! Request handlers.

pub mod auth;
pub mod categories;
pub mod health;
pub mod products;

use axum::extract::multipart::{Field, MultipartError};

use crate::error::{AppError, AppResult};
use zhagaram_core::models::catalog::ImageUpload;

pub(crate) fn bad_multipart(e: MultipartError) -> AppError {
    AppError::Validation(format!("Invalid multipart body: {e}"))
}

/// Read a multipart field as text.
pub(crate) async fn text_field(field: Field<'_>) -> AppResult<String> {
    field.text().await.map_err(bad_multipart)
}

/// Read a multipart file field into an upload, keeping its content type.
pub(crate) async fn file_field(field: Field<'_>) -> AppResult<ImageUpload> {
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let data = field.bytes().await.map_err(bad_multipart)?;
    Ok(ImageUpload {
        data: data.to_vec(),
        content_type,
    })
}
