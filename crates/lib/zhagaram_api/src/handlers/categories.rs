//! Category request handlers.

use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::{bad_multipart, file_field, text_field};
use crate::AppState;
use crate::error::AppResult;
use crate::models::{CategoryResponse, DeleteResponse};
use crate::services::categories::{self, CategoryForm};
use zhagaram_core::models::catalog::ImageUpload;

/// Parse a category multipart body: text fields plus at most one
/// `image` file. Unknown fields are ignored.
async fn parse_category_form(
    mut multipart: Multipart,
) -> AppResult<(CategoryForm, Option<ImageUpload>)> {
    let mut form = CategoryForm::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "image" => image = Some(file_field(field).await?),
            "name" => form.name = Some(text_field(field).await?),
            "description" => form.description = Some(text_field(field).await?),
            _ => {}
        }
    }

    Ok((form, image))
}

/// `GET /api/categories` — public listing.
pub async fn list_categories_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategoryResponse>>> {
    let resp = categories::list(&state.pool).await?;
    Ok(Json(resp))
}

/// `GET /api/categories/{id}` — public single-category fetch.
pub async fn get_category_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CategoryResponse>> {
    let resp = categories::get(&state.pool, &id).await?;
    Ok(Json(resp))
}

/// `GET /api/categories/{id}/image` — raw image bytes with the stored
/// content type.
pub async fn get_category_image_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let (content_type, bytes) = categories::image(&state.pool, &id).await?;
    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

/// `POST /api/categories` — admin-only create (multipart, optional image).
pub async fn create_category_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<CategoryResponse>)> {
    let (form, image) = parse_category_form(multipart).await?;
    let resp = categories::create(&state.pool, &form, image).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// `PUT /api/categories/{id}` — admin-only update; the stored image is
/// kept when none is uploaded.
pub async fn update_category_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<CategoryResponse>> {
    let (form, image) = parse_category_form(multipart).await?;
    let resp = categories::update(&state.pool, &id, &form, image).await?;
    Ok(Json(resp))
}

/// `DELETE /api/categories/{id}` — admin-only delete.
pub async fn delete_category_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let resp = categories::delete(&state.pool, &id).await?;
    Ok(Json(resp))
}
