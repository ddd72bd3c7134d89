//! Category service — validation and CRUD orchestration.

use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::{CategoryResponse, DeleteResponse};
use crate::services::products::MAX_IMAGE_BYTES;
use zhagaram_core::catalog::queries;
use zhagaram_core::models::catalog::{CategoryFields, ImageUpload};

/// Raw category form fields as they arrive from a multipart request.
#[derive(Debug, Default)]
pub struct CategoryForm {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Validate and convert raw form fields into typed category fields.
pub fn build_category_fields(form: &CategoryForm) -> AppResult<CategoryFields> {
    let name = form
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation("Category name is required".into()))?;

    Ok(CategoryFields {
        name: name.to_string(),
        description: form.description.clone().unwrap_or_default(),
    })
}

fn validate_image(image: &Option<ImageUpload>) -> AppResult<()> {
    if let Some(image) = image
        && image.data.len() > MAX_IMAGE_BYTES
    {
        return Err(AppError::Validation(format!(
            "Image exceeds the {MAX_IMAGE_BYTES}-byte limit"
        )));
    }
    Ok(())
}

/// List all categories.
pub async fn list(pool: &PgPool) -> AppResult<Vec<CategoryResponse>> {
    let categories = queries::list_categories(pool).await?;
    Ok(categories.into_iter().map(CategoryResponse::from).collect())
}

/// Fetch a single category.
pub async fn get(pool: &PgPool, id: &str) -> AppResult<CategoryResponse> {
    let category = queries::get_category(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))?;
    Ok(CategoryResponse::from(category))
}

/// Fetch the category image, returning (content_type, bytes).
pub async fn image(pool: &PgPool, id: &str) -> AppResult<(String, Vec<u8>)> {
    queries::get_category_image(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".into()))
}

/// Create a category with an optional image.
pub async fn create(
    pool: &PgPool,
    form: &CategoryForm,
    image: Option<ImageUpload>,
) -> AppResult<CategoryResponse> {
    let fields = build_category_fields(form)?;
    validate_image(&image)?;
    let id = queries::insert_category(pool, &fields, image).await?;
    get(pool, &id).await
}

/// Update a category; the stored image is kept when no new one is given.
pub async fn update(
    pool: &PgPool,
    id: &str,
    form: &CategoryForm,
    image: Option<ImageUpload>,
) -> AppResult<CategoryResponse> {
    let fields = build_category_fields(form)?;
    validate_image(&image)?;
    let found = queries::update_category(pool, id, &fields, image).await?;
    if !found {
        return Err(AppError::NotFound("Category not found".into()));
    }
    get(pool, id).await
}

/// Delete a category.
pub async fn delete(pool: &PgPool, id: &str) -> AppResult<DeleteResponse> {
    let deleted = queries::delete_category(pool, id).await?;
    if !deleted {
        return Err(AppError::NotFound("Category not found".into()));
    }
    Ok(DeleteResponse {
        message: "Category deleted successfully".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required() {
        let err = build_category_fields(&CategoryForm::default()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn description_defaults_to_empty() {
        let fields = build_category_fields(&CategoryForm {
            name: Some("Rings".into()),
            description: None,
        })
        .expect("fields");
        assert_eq!(fields.name, "Rings");
        assert_eq!(fields.description, "");
    }

    #[test]
    fn oversized_image_rejected() {
        let image = Some(ImageUpload {
            data: vec![0u8; MAX_IMAGE_BYTES + 1],
            content_type: "image/png".into(),
        });
        assert!(validate_image(&image).is_err());
    }
}
