//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database unavailable: {0}")]
    DbUnavailable(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::Duplicate(m) => (StatusCode::BAD_REQUEST, "duplicate_key", m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::Forbidden(m) => (StatusCode::FORBIDDEN, "forbidden", m.as_str()),
            AppError::DbUnavailable(m) => {
                (StatusCode::SERVICE_UNAVAILABLE, "db_unavailable", m.as_str())
            }
            // Never leak internals: the detail stays in the log.
            AppError::Internal(m) => {
                tracing::error!(detail = %m, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("row not found".into()),
            sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
                AppError::DbUnavailable(e.to_string())
            }
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<zhagaram_core::auth::AuthError> for AppError {
    fn from(e: zhagaram_core::auth::AuthError) -> Self {
        use zhagaram_core::auth::AuthError;
        match e {
            AuthError::CredentialError => AppError::Unauthorized("Invalid credentials".into()),
            AuthError::UsernameTaken => AppError::Duplicate("Username already exists".into()),
            AuthError::TokenExpired => AppError::Unauthorized("Token expired".into()),
            AuthError::InvalidSignature => {
                AppError::Unauthorized("Invalid token signature".into())
            }
            AuthError::TokenMalformed => AppError::Unauthorized("Malformed token".into()),
            AuthError::DbError(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<zhagaram_core::catalog::CatalogError> for AppError {
    fn from(e: zhagaram_core::catalog::CatalogError) -> Self {
        use zhagaram_core::catalog::CatalogError;
        match e {
            CatalogError::NotFound(msg) => AppError::NotFound(msg),
            CatalogError::DuplicateName(_) => {
                AppError::Duplicate("Category name already exists".into())
            }
            CatalogError::Validation(msg) => AppError::Validation(msg),
            CatalogError::DbError(e) => AppError::from(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zhagaram_core::auth::AuthError;

    #[test]
    fn auth_errors_map_to_expected_statuses() {
        let cases = [
            (AuthError::CredentialError, StatusCode::UNAUTHORIZED),
            (AuthError::UsernameTaken, StatusCode::BAD_REQUEST),
            (AuthError::TokenExpired, StatusCode::UNAUTHORIZED),
            (AuthError::InvalidSignature, StatusCode::UNAUTHORIZED),
            (AuthError::TokenMalformed, StatusCode::UNAUTHORIZED),
        ];
        for (err, status) in cases {
            let resp = AppError::from(err).into_response();
            assert_eq!(resp.status(), status);
        }
    }

    #[test]
    fn internal_error_body_is_generic() {
        let resp = AppError::Internal("connection string with password".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
