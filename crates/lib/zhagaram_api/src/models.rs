//! Request and response DTOs.
//!
//! Wire names are camelCase to match the original API surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zhagaram_core::models::catalog::{Category, Product};

/// Standard error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    pub is_admin: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub user: AuthUser,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Image metadata exposed on catalog payloads. Byte content is only
/// ever served by the dedicated image routes.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMeta {
    pub content_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: CategoryRef,
    pub is_rental: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rental_price: Option<f64>,
    pub stock: i32,
    pub featured: bool,
    pub images: Vec<ImageMeta>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            category: CategoryRef {
                id: p.category_id,
                name: p.category_name,
            },
            is_rental: p.is_rental,
            rental_price: p.rental_price,
            stock: p.stock,
            featured: p.featured,
            images: p
                .image_types
                .into_iter()
                .map(|content_type| ImageMeta { content_type })
                .collect(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageMeta>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        CategoryResponse {
            id: c.id,
            name: c.name,
            description: c.description,
            image: c
                .image_content_type
                .map(|content_type| ImageMeta { content_type }),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub db_connected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_product() -> Product {
        Product {
            id: "p-1".into(),
            name: "Emerald ring".into(),
            description: "".into(),
            price: 129.0,
            category_id: "c-1".into(),
            category_name: Some("Rings".into()),
            is_rental: false,
            rental_price: None,
            stock: 1,
            featured: false,
            image_types: vec!["image/jpeg".into(), "image/png".into()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn product_payload_carries_image_metadata_but_no_bytes() {
        let json =
            serde_json::to_value(ProductResponse::from(sample_product())).expect("serialize");
        assert_eq!(json["images"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["images"][0]["contentType"], "image/jpeg");
        // No byte-bearing field anywhere in the image entries.
        assert!(json["images"][0].get("data").is_none());
        assert_eq!(json["category"]["name"], "Rings");
        assert_eq!(json["isRental"], false);
    }

    #[test]
    fn rental_price_is_omitted_when_absent() {
        let json =
            serde_json::to_value(ProductResponse::from(sample_product())).expect("serialize");
        assert!(json.get("rentalPrice").is_none());
    }
}
