//! Authentication service — login/register flows delegating to
//! `zhagaram_core::auth`.

use sqlx::PgPool;
use tracing::info;

use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};
use crate::models::{AuthUser, TokenResponse};
use zhagaram_core::auth::jwt::generate_token;
use zhagaram_core::auth::password::{hash_password, verify_password};
use zhagaram_core::auth::queries;

/// Build a `TokenResponse` from user data plus a fresh token.
fn build_token_response(id: String, username: &str, is_admin: bool, token: String) -> TokenResponse {
    TokenResponse {
        token,
        user: AuthUser {
            id,
            username: username.to_string(),
            is_admin,
        },
    }
}

/// Authenticate with username + password.
///
/// A login matching the configured bootstrap admin credential pair takes
/// the provisioning path before the regular hash comparison.
pub async fn login(
    pool: &PgPool,
    config: &ApiConfig,
    username: &str,
    password: &str,
) -> AppResult<TokenResponse> {
    // Both configured values must be non-empty: an unset ADMIN_PASSWORD
    // defaults to "" and must never make an empty submitted password
    // match the provisioning path.
    if !config.admin_username.is_empty()
        && !config.admin_password.is_empty()
        && username == config.admin_username
        && password == config.admin_password
    {
        return bootstrap_admin_login(pool, config).await;
    }

    let row = queries::find_user_by_username(pool, username).await?;

    // Generic error for unknown username and wrong password alike.
    let (user_id, password_hash, is_admin) = match row {
        None => return Err(AppError::Unauthorized("Invalid credentials".into())),
        Some(r) => r,
    };

    if !verify_password(password, &password_hash)? {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let token = generate_token(&user_id, username, is_admin, config.jwt_secret.as_bytes())?;
    Ok(build_token_response(user_id, username, is_admin, token))
}

/// Admin login path: the submitted pair already matched the configured
/// plaintext credentials, so the stored hash is not consulted here
/// (carried over from the original system). Creates the admin identity
/// on first login; idempotent afterwards.
async fn bootstrap_admin_login(pool: &PgPool, config: &ApiConfig) -> AppResult<TokenResponse> {
    let user_id = match queries::find_user_by_username(pool, &config.admin_username).await? {
        Some((id, _, _)) => id,
        None => {
            let password_hash = hash_password(&config.admin_password)?;
            let user = queries::create_user(pool, &config.admin_username, &password_hash, true)
                .await?;
            info!(username = %config.admin_username, "provisioned bootstrap admin identity");
            user.id
        }
    };

    let token = generate_token(
        &user_id,
        &config.admin_username,
        true,
        config.jwt_secret.as_bytes(),
    )?;
    Ok(build_token_response(
        user_id,
        &config.admin_username,
        true,
        token,
    ))
}

/// Register a new (non-admin) user account.
pub async fn register(
    pool: &PgPool,
    jwt_secret: &[u8],
    username: &str,
    password: &str,
) -> AppResult<TokenResponse> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("Username is required".into()));
    }
    if password.is_empty() {
        return Err(AppError::Validation("Password is required".into()));
    }

    if queries::username_exists(pool, username).await? {
        return Err(AppError::Duplicate("Username already exists".into()));
    }

    let password_hash = hash_password(password)?;
    // A concurrent registration can still win the race; the unique
    // constraint resolves it and surfaces as the same duplicate error.
    let user = queries::create_user(pool, username, &password_hash, false).await?;

    let token = generate_token(&user.id, username, false, jwt_secret)?;
    Ok(build_token_response(user.id, username, false, token))
}
