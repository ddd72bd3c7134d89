//! # zhagaram_api
//!
//! HTTP API library for the Zhagaram catalog backend.
//!
//! Read routes are public; every mutating route is gated behind the
//! bearer-token middleware at admin level before any handler runs.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{MethodRouter, get, post, put};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{auth, categories, health, products};

/// Request body cap — image uploads can be large (up to 5 files of
/// 5 MiB plus form overhead).
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration.
    pub config: ApiConfig,
}

/// Run embedded database migrations.
///
/// Delegates to `zhagaram_core::migrate::migrate()` which owns the
/// migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    zhagaram_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Admin gate: require_auth runs first (outermost), then the role
    // check, then the handler.
    let admin_only = {
        let state = state.clone();
        move |routes: MethodRouter<AppState>| {
            routes
                .layer(from_fn(middleware::auth::require_admin))
                .layer(from_fn_with_state(
                    state.clone(),
                    middleware::auth::require_auth,
                ))
        }
    };

    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/auth/register", post(auth::register_handler))
        .route(
            "/api/categories",
            get(categories::list_categories_handler)
                .merge(admin_only(post(categories::create_category_handler))),
        )
        .route(
            "/api/categories/{id}",
            get(categories::get_category_handler).merge(admin_only(
                put(categories::update_category_handler)
                    .delete(categories::delete_category_handler),
            )),
        )
        .route(
            "/api/categories/{id}/image",
            get(categories::get_category_image_handler),
        )
        .route(
            "/api/products",
            get(products::list_products_handler)
                .merge(admin_only(post(products::create_product_handler))),
        )
        .route(
            "/api/products/{id}",
            get(products::get_product_handler).merge(admin_only(
                put(products::update_product_handler).delete(products::delete_product_handler),
            )),
        )
        .route(
            "/api/products/{id}/image/{index}",
            get(products::get_product_image_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}
