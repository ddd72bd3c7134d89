//! Product service — validation and CRUD orchestration.
//!
//! All validation runs before any store access, so a rejected request
//! never writes.

use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::{DeleteResponse, ProductResponse};
use zhagaram_core::catalog::queries;
use zhagaram_core::models::catalog::{ImageUpload, ProductFields, ProductFilter};

/// Upload limits, matching the original API (5 files, 5 MiB each).
pub const MAX_IMAGES_PER_UPLOAD: usize = 5;
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Raw product form fields as they arrive from a multipart request.
#[derive(Debug, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub is_rental: bool,
    pub rental_price: Option<String>,
    pub stock: Option<String>,
    pub featured: bool,
}

/// Validate and convert raw form fields into typed product fields.
///
/// The category reference is required but not checked for existence
/// (soft constraint, preserved from the original).
pub fn build_product_fields(form: &ProductForm) -> AppResult<ProductFields> {
    let name = form
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation("Product name is required".into()))?;

    let category_id = form
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Validation("Product category is required".into()))?;

    let price: f64 = form
        .price
        .as_deref()
        .ok_or_else(|| AppError::Validation("Product price is required".into()))?
        .parse()
        .map_err(|_| AppError::Validation("Product price must be a number".into()))?;
    if price < 0.0 || !price.is_finite() {
        return Err(AppError::Validation(
            "Product price must not be negative".into(),
        ));
    }

    let rental_price = match form.rental_price.as_deref() {
        None => None,
        Some(raw) => {
            let value: f64 = raw
                .parse()
                .map_err(|_| AppError::Validation("Rental price must be a number".into()))?;
            if value < 0.0 || !value.is_finite() {
                return Err(AppError::Validation(
                    "Rental price must not be negative".into(),
                ));
            }
            Some(value)
        }
    };

    // Unparseable stock falls back to 1, like the original's parseInt || 1.
    let stock = form
        .stock
        .as_deref()
        .and_then(|s| s.parse::<i32>().ok())
        .unwrap_or(1);
    if stock < 0 {
        return Err(AppError::Validation("Stock must not be negative".into()));
    }

    Ok(ProductFields {
        name: name.to_string(),
        description: form.description.clone().unwrap_or_default(),
        price,
        category_id: category_id.to_string(),
        is_rental: form.is_rental,
        rental_price,
        stock,
        featured: form.featured,
    })
}

/// Enforce the per-upload image limits.
pub fn validate_images(images: &[ImageUpload]) -> AppResult<()> {
    if images.len() > MAX_IMAGES_PER_UPLOAD {
        return Err(AppError::Validation(format!(
            "At most {MAX_IMAGES_PER_UPLOAD} images per upload"
        )));
    }
    for image in images {
        if image.data.len() > MAX_IMAGE_BYTES {
            return Err(AppError::Validation(format!(
                "Image exceeds the {MAX_IMAGE_BYTES}-byte limit"
            )));
        }
    }
    Ok(())
}

/// List products, filtered and newest-first.
pub async fn list(pool: &PgPool, filter: &ProductFilter) -> AppResult<Vec<ProductResponse>> {
    let products = queries::list_products(pool, filter).await?;
    Ok(products.into_iter().map(ProductResponse::from).collect())
}

/// Fetch a single product.
pub async fn get(pool: &PgPool, id: &str) -> AppResult<ProductResponse> {
    let product = queries::get_product(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;
    Ok(ProductResponse::from(product))
}

/// Fetch one product image, returning (content_type, bytes).
pub async fn image(pool: &PgPool, id: &str, index: i32) -> AppResult<(String, Vec<u8>)> {
    queries::get_product_image(pool, id, index)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".into()))
}

/// Create a product with its image sequence.
pub async fn create(
    pool: &PgPool,
    form: &ProductForm,
    images: Vec<ImageUpload>,
) -> AppResult<ProductResponse> {
    let fields = build_product_fields(form)?;
    validate_images(&images)?;
    let id = queries::insert_product(pool, &fields, images).await?;
    get(pool, &id).await
}

/// Update a product; `keep_existing` appends new images after the
/// stored sequence instead of replacing it.
pub async fn update(
    pool: &PgPool,
    id: &str,
    form: &ProductForm,
    images: Vec<ImageUpload>,
    keep_existing: bool,
) -> AppResult<ProductResponse> {
    let fields = build_product_fields(form)?;
    validate_images(&images)?;
    let found = queries::update_product(pool, id, &fields, images, keep_existing).await?;
    if !found {
        return Err(AppError::NotFound("Product not found".into()));
    }
    get(pool, id).await
}

/// Delete a product.
pub async fn delete(pool: &PgPool, id: &str) -> AppResult<DeleteResponse> {
    let deleted = queries::delete_product(pool, id).await?;
    if !deleted {
        return Err(AppError::NotFound("Product not found".into()));
    }
    Ok(DeleteResponse {
        message: "Product deleted successfully".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ProductForm {
        ProductForm {
            name: Some("Emerald ring".into()),
            description: Some("22k gold".into()),
            price: Some("129.50".into()),
            category: Some("0192f0c1-0000-7000-8000-000000000000".into()),
            is_rental: false,
            rental_price: None,
            stock: Some("3".into()),
            featured: true,
        }
    }

    #[test]
    fn valid_form_converts() {
        let fields = build_product_fields(&valid_form()).expect("fields");
        assert_eq!(fields.name, "Emerald ring");
        assert_eq!(fields.price, 129.50);
        assert_eq!(fields.stock, 3);
        assert!(fields.featured);
    }

    #[test]
    fn missing_name_is_rejected() {
        let mut form = valid_form();
        form.name = Some("   ".into());
        let err = build_product_fields(&form).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut form = valid_form();
        form.price = Some("-5".into());
        let err = build_product_fields(&form).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let mut form = valid_form();
        form.price = Some("free".into());
        assert!(build_product_fields(&form).is_err());
    }

    #[test]
    fn unparseable_stock_defaults_to_one() {
        let mut form = valid_form();
        form.stock = Some("lots".into());
        let fields = build_product_fields(&form).expect("fields");
        assert_eq!(fields.stock, 1);
    }

    #[test]
    fn missing_stock_defaults_to_one() {
        let mut form = valid_form();
        form.stock = None;
        assert_eq!(build_product_fields(&form).expect("fields").stock, 1);
    }

    #[test]
    fn rental_price_parsed_when_present() {
        let mut form = valid_form();
        form.is_rental = true;
        form.rental_price = Some("12.5".into());
        let fields = build_product_fields(&form).expect("fields");
        assert_eq!(fields.rental_price, Some(12.5));
    }

    #[test]
    fn too_many_images_rejected() {
        let images: Vec<_> = (0..6)
            .map(|_| ImageUpload {
                data: vec![0u8; 4],
                content_type: "image/png".into(),
            })
            .collect();
        assert!(validate_images(&images).is_err());
    }

    #[test]
    fn oversized_image_rejected() {
        let images = vec![ImageUpload {
            data: vec![0u8; MAX_IMAGE_BYTES + 1],
            content_type: "image/png".into(),
        }];
        assert!(validate_images(&images).is_err());
    }

    #[test]
    fn five_small_images_pass() {
        let images: Vec<_> = (0..5)
            .map(|_| ImageUpload {
                data: vec![0u8; 16],
                content_type: "image/jpeg".into(),
            })
            .collect();
        assert!(validate_images(&images).is_ok());
    }
}
