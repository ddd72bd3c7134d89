//! Bearer token generation and verification.
//!
//! Tokens are stateless HS256 JWTs: claims are the sole identity source
//! for a request, with no per-request store lookup and no revocation
//! list. A demoted or deleted user keeps their capability until the
//! token expires (24-hour trust window).

use std::path::PathBuf;

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::info;

use super::AuthError;
use crate::models::auth::TokenClaims;

/// Token lifetime: 24 hours.
const TOKEN_EXPIRY_HOURS: i64 = 24;

/// Generate a signed bearer token (HS256, 24-hour expiry).
pub fn generate_token(
    user_id: &str,
    username: &str,
    is_admin: bool,
    secret: &[u8],
) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        is_admin,
        iat: now.timestamp(),
        exp: (now + Duration::hours(TOKEN_EXPIRY_HOURS)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
}

/// Verify a bearer token, returning the embedded claims on success.
///
/// Distinguishes the three failure modes the authorization gate needs:
/// expiry, bad signature, and anything that does not parse as a JWT.
pub fn verify_token(token: &str, secret: &[u8]) -> Result<TokenClaims, AuthError> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation.leeway = 0;
    let claims = decode::<TokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::TokenMalformed,
        })?;
    // `jsonwebtoken` still accepts a token whose `exp` equals the
    // current second; here the expiry instant itself is already stale.
    if claims.exp <= Utc::now().timestamp() {
        return Err(AuthError::TokenExpired);
    }
    Ok(claims)
}

/// Resolve the JWT secret: env var `JWT_SECRET` → persisted file.
pub fn resolve_jwt_secret() -> String {
    if let Ok(secret) = std::env::var("JWT_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    // Generate and persist
    let secret_path = jwt_secret_path();
    if let Ok(existing) = std::fs::read_to_string(&secret_path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = secret_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = std::fs::write(&secret_path, &secret);
    info!(path = %secret_path.display(), "generated new JWT secret");
    secret
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("zhagaram")
        .join("jwt-secret")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn fresh_token_verifies_with_claims_intact() {
        let token = generate_token("u-1", "meena", true, SECRET).expect("generate");
        let claims = verify_token(&token, SECRET).expect("verify");
        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.username, "meena");
        assert!(claims.is_admin);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn wrong_secret_is_invalid_signature() {
        let token = generate_token("u-1", "meena", false, SECRET).expect("generate");
        let err = verify_token(&token, b"other-secret").unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: "u-1".into(),
            username: "meena".into(),
            is_admin: false,
            iat: now - 100_000,
            exp: now - 10,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .expect("encode");
        let err = verify_token(&token, SECRET).unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[test]
    fn token_at_the_expiry_instant_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: "u-1".into(),
            username: "meena".into(),
            is_admin: false,
            iat: now - 24 * 60 * 60,
            exp: now,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .expect("encode");
        let err = verify_token(&token, SECRET).unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[test]
    fn token_near_expiry_still_verifies() {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: "u-1".into(),
            username: "meena".into(),
            is_admin: false,
            iat: now - 24 * 60 * 60 + 60,
            exp: now + 60,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .expect("encode");
        assert!(verify_token(&token, SECRET).is_ok());
    }

    #[test]
    fn garbage_is_malformed() {
        let err = verify_token("not-a-jwt", SECRET).unwrap_err();
        assert!(matches!(err, AuthError::TokenMalformed));
    }
}
