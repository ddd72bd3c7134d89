//! Health check endpoint.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::models::HealthResponse;

/// `GET /api/health` — liveness plus DB connectivity probe.
pub async fn health_check(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let db_connected = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();

    Ok(Json(HealthResponse {
        status: "OK".into(),
        message: format!(
            "Zhagaram catalog API v{} is running",
            zhagaram_core::version()
        ),
        db_connected,
    }))
}
