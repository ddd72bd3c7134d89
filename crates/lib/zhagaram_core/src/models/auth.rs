//! Authentication domain models.

use serde::{Deserialize, Serialize};

/// Stored identity record, minus the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub is_admin: bool,
}

/// JWT claims embedded in bearer tokens.
///
/// Wire field names match the original API (`isAdmin`), so tokens stay
/// interchangeable with clients built against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — user ID (standard JWT `sub` claim).
    pub sub: String,
    /// Username at issuance time.
    pub username: String,
    /// Admin capability flag.
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_serialize_with_wire_names() {
        let claims = TokenClaims {
            sub: "u-1".into(),
            username: "meena".into(),
            is_admin: true,
            iat: 100,
            exp: 200,
        };
        let json = serde_json::to_value(&claims).expect("serialize");
        assert_eq!(json["isAdmin"], true);
        assert!(json.get("is_admin").is_none());
    }
}
