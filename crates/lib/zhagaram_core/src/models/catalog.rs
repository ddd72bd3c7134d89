//! Catalog domain models.
//!
//! Image bytes never ride along with catalog records: `Product` and
//! `Category` only carry content-type metadata, and the bytes are
//! fetched individually through the image queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A binary image asset received from an upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Catalog product. `image_types` lists the content types of the stored
/// image sequence in position order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: String,
    /// Name of the referenced category, when it still exists. The
    /// reference is soft — see the catalog migration.
    pub category_name: Option<String>,
    pub is_rental: bool,
    pub rental_price: Option<f64>,
    pub stock: i32,
    pub featured: bool,
    pub image_types: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field values for a product insert or full update.
#[derive(Debug, Clone)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: String,
    pub is_rental: bool,
    /// Only persisted when `is_rental` is set.
    pub rental_price: Option<f64>,
    pub stock: i32,
    pub featured: bool,
}

/// Filter for product listings.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_id: Option<String>,
    pub is_rental: Option<bool>,
    pub featured: Option<bool>,
}

/// Catalog category with at most one image asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Content type of the stored image, if one exists.
    pub image_content_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field values for a category insert or update.
#[derive(Debug, Clone)]
pub struct CategoryFields {
    pub name: String,
    pub description: String,
}
