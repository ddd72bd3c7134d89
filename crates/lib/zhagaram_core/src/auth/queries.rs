//! Identity database queries.

use sqlx::PgPool;

use super::AuthError;
use crate::models::auth::User;

/// True when a sqlx error is a unique-constraint violation (PG 23505).
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

/// Fetch a user by username, returning (id, password_hash, is_admin).
pub async fn find_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<(String, String, bool)>, AuthError> {
    let row = sqlx::query_as::<_, (String, String, bool)>(
        "SELECT id::text, password_hash, is_admin FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Check whether a username is already registered.
pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, AuthError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// Create a new user. A concurrent duplicate registration loses the race
/// at the unique constraint and surfaces as `UsernameTaken`.
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
    is_admin: bool,
) -> Result<User, AuthError> {
    let user_id = sqlx::query_scalar::<_, String>(
        "INSERT INTO users (username, password_hash, is_admin) \
         VALUES ($1, $2, $3) RETURNING id::text",
    )
    .bind(username)
    .bind(password_hash)
    .bind(is_admin)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AuthError::UsernameTaken
        } else {
            AuthError::DbError(e)
        }
    })?;
    Ok(User {
        id: user_id,
        username: username.to_string(),
        is_admin,
    })
}
