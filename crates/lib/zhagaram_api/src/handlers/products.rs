//! Product request handlers.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use super::{bad_multipart, file_field, text_field};
use crate::AppState;
use crate::error::AppResult;
use crate::models::{DeleteResponse, ProductResponse};
use crate::services::products::{self, ProductForm};
use zhagaram_core::models::catalog::{ImageUpload, ProductFilter};

/// Query-string filters for the product listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub is_rental: Option<bool>,
    pub featured: Option<bool>,
}

/// Parse a product multipart body into form fields, image uploads, and
/// the `keepExistingImages` flag. Unknown fields are ignored.
async fn parse_product_form(
    mut multipart: Multipart,
) -> AppResult<(ProductForm, Vec<ImageUpload>, bool)> {
    let mut form = ProductForm::default();
    let mut images = Vec::new();
    let mut keep_existing = false;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "images" => images.push(file_field(field).await?),
            "name" => form.name = Some(text_field(field).await?),
            "description" => form.description = Some(text_field(field).await?),
            "price" => form.price = Some(text_field(field).await?),
            "category" => form.category = Some(text_field(field).await?),
            "isRental" => form.is_rental = text_field(field).await? == "true",
            "rentalPrice" => form.rental_price = Some(text_field(field).await?),
            "stock" => form.stock = Some(text_field(field).await?),
            "featured" => form.featured = text_field(field).await? == "true",
            "keepExistingImages" => keep_existing = text_field(field).await? == "true",
            _ => {}
        }
    }

    Ok((form, images, keep_existing))
}

/// `GET /api/products` — public listing with optional filters.
pub async fn list_products_handler(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> AppResult<Json<Vec<ProductResponse>>> {
    let filter = ProductFilter {
        category_id: query.category,
        is_rental: query.is_rental,
        featured: query.featured,
    };
    let resp = products::list(&state.pool, &filter).await?;
    Ok(Json(resp))
}

/// `GET /api/products/{id}` — public single-product fetch.
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    let resp = products::get(&state.pool, &id).await?;
    Ok(Json(resp))
}

/// `GET /api/products/{id}/image/{index}` — raw image bytes with the
/// stored content type.
pub async fn get_product_image_handler(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, i32)>,
) -> AppResult<Response> {
    let (content_type, bytes) = products::image(&state.pool, &id, index).await?;
    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

/// `POST /api/products` — admin-only create (multipart, up to 5 images).
pub async fn create_product_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    let (form, images, _) = parse_product_form(multipart).await?;
    let resp = products::create(&state.pool, &form, images).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// `PUT /api/products/{id}` — admin-only full update; the
/// `keepExistingImages` flag appends uploads instead of replacing.
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<ProductResponse>> {
    let (form, images, keep_existing) = parse_product_form(multipart).await?;
    let resp = products::update(&state.pool, &id, &form, images, keep_existing).await?;
    Ok(Json(resp))
}

/// `DELETE /api/products/{id}` — admin-only delete.
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let resp = products::delete(&state.pool, &id).await?;
    Ok(Json(resp))
}
