//! Query tests against a live PostgreSQL database.
//!
//! These exercise the behavior that lives in SQL: image sequence
//! append/replace, unique-constraint mapping, cascade on delete. Each
//! test connects through `DATABASE_URL` and skips when it is unset, so
//! the suite stays green on machines without a database. Names carry a
//! fresh UUID so concurrent runs never collide.

use sqlx::PgPool;
use zhagaram_core::auth::AuthError;
use zhagaram_core::auth::queries as auth_queries;
use zhagaram_core::catalog::CatalogError;
use zhagaram_core::catalog::queries;
use zhagaram_core::models::catalog::{CategoryFields, ImageUpload, ProductFields};
use zhagaram_core::uuid::uuidv7;

async fn connect() -> Option<PgPool> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("skipping: DATABASE_URL not set");
        return None;
    };
    let pool = PgPool::connect(&url).await.expect("connect");
    zhagaram_core::migrate::migrate(&pool).await.expect("migrate");
    Some(pool)
}

/// Image whose bytes spell out its own content type, so position checks
/// can assert on both.
fn image(content_type: &str) -> ImageUpload {
    ImageUpload {
        data: content_type.as_bytes().to_vec(),
        content_type: content_type.to_string(),
    }
}

fn product_fields(name: &str, category_id: &str) -> ProductFields {
    ProductFields {
        name: name.to_string(),
        description: String::new(),
        price: 250.0,
        category_id: category_id.to_string(),
        is_rental: false,
        rental_price: None,
        stock: 1,
        featured: false,
    }
}

async fn fresh_category(pool: &PgPool, prefix: &str) -> String {
    let fields = CategoryFields {
        name: format!("{prefix}-{}", uuidv7()),
        description: String::new(),
    };
    queries::insert_category(pool, &fields, None)
        .await
        .expect("insert category")
}

#[tokio::test]
async fn keeping_existing_images_appends_after_them_in_order() {
    let Some(pool) = connect().await else { return };
    let category_id = fresh_category(&pool, "bangles").await;
    let fields = product_fields("Gold bangle", &category_id);

    let id = queries::insert_product(
        &pool,
        &fields,
        vec![image("image/one"), image("image/two")],
    )
    .await
    .expect("insert product");

    let updated = queries::update_product(&pool, &id, &fields, vec![image("image/three")], true)
        .await
        .expect("update product");
    assert!(updated);

    let product = queries::get_product(&pool, &id)
        .await
        .expect("get product")
        .expect("product present");
    assert_eq!(product.image_types, ["image/one", "image/two", "image/three"]);

    // The appended upload landed at the next free position.
    let (content_type, bytes) = queries::get_product_image(&pool, &id, 2)
        .await
        .expect("get image")
        .expect("image present");
    assert_eq!(content_type, "image/three");
    assert_eq!(bytes, b"image/three");

    assert!(queries::delete_product(&pool, &id).await.expect("cleanup"));
    queries::delete_category(&pool, &category_id)
        .await
        .expect("cleanup");
}

#[tokio::test]
async fn replacing_images_discards_the_old_sequence() {
    let Some(pool) = connect().await else { return };
    let category_id = fresh_category(&pool, "rings").await;
    let fields = product_fields("Emerald ring", &category_id);

    let id = queries::insert_product(
        &pool,
        &fields,
        vec![image("image/old-a"), image("image/old-b")],
    )
    .await
    .expect("insert product");

    let updated = queries::update_product(&pool, &id, &fields, vec![image("image/new")], false)
        .await
        .expect("update product");
    assert!(updated);

    let product = queries::get_product(&pool, &id)
        .await
        .expect("get product")
        .expect("product present");
    assert_eq!(product.image_types, ["image/new"]);

    // The replacement restarts at position 0; the old tail is gone.
    let gone = queries::get_product_image(&pool, &id, 1)
        .await
        .expect("get image");
    assert!(gone.is_none());

    assert!(queries::delete_product(&pool, &id).await.expect("cleanup"));
    queries::delete_category(&pool, &category_id)
        .await
        .expect("cleanup");
}

#[tokio::test]
async fn update_without_uploads_keeps_the_existing_sequence() {
    let Some(pool) = connect().await else { return };
    let category_id = fresh_category(&pool, "chains").await;
    let fields = product_fields("Silver chain", &category_id);

    let id = queries::insert_product(&pool, &fields, vec![image("image/only")])
        .await
        .expect("insert product");

    let updated = queries::update_product(&pool, &id, &fields, vec![], false)
        .await
        .expect("update product");
    assert!(updated);

    let product = queries::get_product(&pool, &id)
        .await
        .expect("get product")
        .expect("product present");
    assert_eq!(product.image_types, ["image/only"]);

    assert!(queries::delete_product(&pool, &id).await.expect("cleanup"));
    queries::delete_category(&pool, &category_id)
        .await
        .expect("cleanup");
}

#[tokio::test]
async fn duplicate_category_name_is_rejected_and_one_record_remains() {
    let Some(pool) = connect().await else { return };
    let name = format!("Necklaces-{}", uuidv7());
    let fields = CategoryFields {
        name: name.clone(),
        description: String::new(),
    };

    let id = queries::insert_category(&pool, &fields, None)
        .await
        .expect("first insert");
    let err = queries::insert_category(&pool, &fields, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateName(ref n) if *n == name));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE name = $1")
        .bind(&name)
        .fetch_one(&pool)
        .await
        .expect("count");
    assert_eq!(count, 1);

    assert!(
        queries::delete_category(&pool, &id)
            .await
            .expect("cleanup")
    );
}

#[tokio::test]
async fn duplicate_username_loses_to_the_constraint() {
    let Some(pool) = connect().await else { return };
    let username = format!("meena-{}", uuidv7());

    auth_queries::create_user(&pool, &username, "hash-a", false)
        .await
        .expect("first insert");
    let err = auth_queries::create_user(&pool, &username, "hash-b", false)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::UsernameTaken));

    sqlx::query("DELETE FROM users WHERE username = $1")
        .bind(&username)
        .execute(&pool)
        .await
        .expect("cleanup");
}
