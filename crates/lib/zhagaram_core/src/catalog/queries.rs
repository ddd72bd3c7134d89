//! Catalog database queries.
//!
//! Image bytes stay out of every list/get query; they are fetched only
//! by the dedicated `get_*_image` queries. Image sequence rewrites run
//! inside a transaction so the record and its assets change atomically.

use sqlx::{FromRow, PgPool};

use super::CatalogError;
use crate::auth::queries::is_unique_violation;
use crate::models::catalog::{
    Category, CategoryFields, ImageUpload, Product, ProductFields, ProductFilter,
};
use crate::uuid::uuidv7;

/// Columns shared by every product select. `image_types` aggregates the
/// stored content types in position order — metadata only, no bytes.
const PRODUCT_SELECT: &str = "SELECT p.id::text, p.name, p.description, p.price, \
     p.category_id::text, c.name AS category_name, \
     p.is_rental, p.rental_price, p.stock, p.featured, \
     (SELECT array_agg(pi.content_type ORDER BY pi.position) \
        FROM product_images pi WHERE pi.product_id = p.id) AS image_types, \
     p.created_at, p.updated_at \
     FROM products p LEFT JOIN categories c ON c.id = p.category_id";

#[derive(FromRow)]
struct ProductRow {
    id: String,
    name: String,
    description: String,
    price: f64,
    category_id: String,
    category_name: Option<String>,
    is_rental: bool,
    rental_price: Option<f64>,
    stock: i32,
    featured: bool,
    image_types: Option<Vec<String>>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            category_id: row.category_id,
            category_name: row.category_name,
            is_rental: row.is_rental,
            rental_price: row.rental_price,
            stock: row.stock,
            featured: row.featured,
            image_types: row.image_types.unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// List products newest-first, optionally filtered by category reference
/// and boolean flags.
pub async fn list_products(
    pool: &PgPool,
    filter: &ProductFilter,
) -> Result<Vec<Product>, CatalogError> {
    let sql = format!(
        "{PRODUCT_SELECT} \
         WHERE ($1::uuid IS NULL OR p.category_id = $1::uuid) \
           AND ($2::bool IS NULL OR p.is_rental = $2) \
           AND ($3::bool IS NULL OR p.featured = $3) \
         ORDER BY p.created_at DESC"
    );
    let rows = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(filter.category_id.as_deref())
        .bind(filter.is_rental)
        .bind(filter.featured)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Product::from).collect())
}

/// Fetch a single product by id.
pub async fn get_product(pool: &PgPool, id: &str) -> Result<Option<Product>, CatalogError> {
    let sql = format!("{PRODUCT_SELECT} WHERE p.id = $1::uuid");
    let row = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Product::from))
}

/// Fetch one image of a product by position, returning (content_type, bytes).
pub async fn get_product_image(
    pool: &PgPool,
    id: &str,
    index: i32,
) -> Result<Option<(String, Vec<u8>)>, CatalogError> {
    let row = sqlx::query_as::<_, (String, Vec<u8>)>(
        "SELECT content_type, data FROM product_images \
         WHERE product_id = $1::uuid AND position = $2",
    )
    .bind(id)
    .bind(index)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert a product and its image sequence, returning the new id.
pub async fn insert_product(
    pool: &PgPool,
    fields: &ProductFields,
    images: Vec<ImageUpload>,
) -> Result<String, CatalogError> {
    let id = uuidv7();
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO products \
         (id, name, description, price, category_id, is_rental, rental_price, stock, featured) \
         VALUES ($1, $2, $3, $4, $5::uuid, $6, $7, $8, $9)",
    )
    .bind(id)
    .bind(&fields.name)
    .bind(&fields.description)
    .bind(fields.price)
    .bind(&fields.category_id)
    .bind(fields.is_rental)
    .bind(fields.rental_price.filter(|_| fields.is_rental))
    .bind(fields.stock)
    .bind(fields.featured)
    .execute(&mut *tx)
    .await?;

    for (position, image) in images.into_iter().enumerate() {
        sqlx::query(
            "INSERT INTO product_images (product_id, position, content_type, data) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(position as i32)
        .bind(image.content_type)
        .bind(image.data)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(id.to_string())
}

/// Update a product. When `new_images` is non-empty the image sequence is
/// either appended to (`keep_existing`) or wholesale replaced; appended
/// images land after the existing ones in upload order. Returns `false`
/// when no product with the id exists.
pub async fn update_product(
    pool: &PgPool,
    id: &str,
    fields: &ProductFields,
    new_images: Vec<ImageUpload>,
    keep_existing: bool,
) -> Result<bool, CatalogError> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        "UPDATE products SET name = $2, description = $3, price = $4, \
         category_id = $5::uuid, is_rental = $6, rental_price = $7, \
         stock = $8, featured = $9, updated_at = now() \
         WHERE id = $1::uuid",
    )
    .bind(id)
    .bind(&fields.name)
    .bind(&fields.description)
    .bind(fields.price)
    .bind(&fields.category_id)
    .bind(fields.is_rental)
    .bind(fields.rental_price.filter(|_| fields.is_rental))
    .bind(fields.stock)
    .bind(fields.featured)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if updated == 0 {
        return Ok(false);
    }

    if !new_images.is_empty() {
        let start = if keep_existing {
            sqlx::query_scalar::<_, i32>(
                "SELECT COALESCE(MAX(position) + 1, 0) FROM product_images \
                 WHERE product_id = $1::uuid",
            )
            .bind(id)
            .fetch_one(&mut *tx)
            .await?
        } else {
            sqlx::query("DELETE FROM product_images WHERE product_id = $1::uuid")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            0
        };

        for (offset, image) in new_images.into_iter().enumerate() {
            sqlx::query(
                "INSERT INTO product_images (product_id, position, content_type, data) \
                 VALUES ($1::uuid, $2, $3, $4)",
            )
            .bind(id)
            .bind(start + offset as i32)
            .bind(image.content_type)
            .bind(image.data)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    Ok(true)
}

/// Delete a product (images cascade). Returns `false` when absent.
pub async fn delete_product(pool: &PgPool, id: &str) -> Result<bool, CatalogError> {
    let deleted = sqlx::query("DELETE FROM products WHERE id = $1::uuid")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(deleted > 0)
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    description: String,
    image_content_type: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            description: row.description,
            image_content_type: row.image_content_type,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const CATEGORY_SELECT: &str = "SELECT id::text, name, description, image_content_type, \
     created_at, updated_at FROM categories";

/// List all categories.
pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>, CatalogError> {
    let sql = format!("{CATEGORY_SELECT} ORDER BY created_at");
    let rows = sqlx::query_as::<_, CategoryRow>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Category::from).collect())
}

/// Fetch a single category by id.
pub async fn get_category(pool: &PgPool, id: &str) -> Result<Option<Category>, CatalogError> {
    let sql = format!("{CATEGORY_SELECT} WHERE id = $1::uuid");
    let row = sqlx::query_as::<_, CategoryRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Category::from))
}

/// Fetch the category image, returning (content_type, bytes).
pub async fn get_category_image(
    pool: &PgPool,
    id: &str,
) -> Result<Option<(String, Vec<u8>)>, CatalogError> {
    let row = sqlx::query_as::<_, (String, Vec<u8>)>(
        "SELECT image_content_type, image_data FROM categories \
         WHERE id = $1::uuid AND image_data IS NOT NULL",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert a category, returning the new id. A name collision surfaces
/// as `DuplicateName`.
pub async fn insert_category(
    pool: &PgPool,
    fields: &CategoryFields,
    image: Option<ImageUpload>,
) -> Result<String, CatalogError> {
    let id = uuidv7();
    sqlx::query(
        "INSERT INTO categories (id, name, description, image_data, image_content_type) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id)
    .bind(&fields.name)
    .bind(&fields.description)
    .bind(image.as_ref().map(|i| i.data.clone()))
    .bind(image.as_ref().map(|i| i.content_type.clone()))
    .execute(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            CatalogError::DuplicateName(fields.name.clone())
        } else {
            CatalogError::DbError(e)
        }
    })?;
    Ok(id.to_string())
}

/// Update a category; the stored image is kept when no new one is given.
/// Returns `false` when absent.
pub async fn update_category(
    pool: &PgPool,
    id: &str,
    fields: &CategoryFields,
    image: Option<ImageUpload>,
) -> Result<bool, CatalogError> {
    let updated = sqlx::query(
        "UPDATE categories SET name = $2, description = $3, \
         image_data = COALESCE($4, image_data), \
         image_content_type = COALESCE($5, image_content_type), \
         updated_at = now() \
         WHERE id = $1::uuid",
    )
    .bind(id)
    .bind(&fields.name)
    .bind(&fields.description)
    .bind(image.as_ref().map(|i| i.data.clone()))
    .bind(image.as_ref().map(|i| i.content_type.clone()))
    .execute(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            CatalogError::DuplicateName(fields.name.clone())
        } else {
            CatalogError::DbError(e)
        }
    })?
    .rows_affected();
    Ok(updated > 0)
}

/// Delete a category. Products referencing it keep their dangling
/// reference (soft constraint, matching the original behavior).
pub async fn delete_category(pool: &PgPool, id: &str) -> Result<bool, CatalogError> {
    let deleted = sqlx::query("DELETE FROM categories WHERE id = $1::uuid")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(deleted > 0)
}
