//! Authentication request handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::AppState;
use crate::error::AppResult;
use crate::models::{LoginRequest, RegisterRequest, TokenResponse};
use crate::services::auth;

/// `POST /api/auth/login` — authenticate with username + password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let resp = auth::login(&state.pool, &state.config, &body.username, &body.password).await?;
    Ok(Json(resp))
}

/// `POST /api/auth/register` — create a new user account.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let resp = auth::register(
        &state.pool,
        state.config.jwt_secret.as_bytes(),
        &body.username,
        &body.password,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
