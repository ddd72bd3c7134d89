//! API server configuration.
//!
//! All process-lifetime state (signing secret, bootstrap admin
//! credentials) lives in this explicit struct — no ambient globals.

use zhagaram_core::auth::jwt::resolve_jwt_secret;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub pg_connection_url: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Bootstrap admin username. Empty disables admin provisioning.
    pub admin_username: String,
    /// Bootstrap admin password (plaintext, compared on the login path).
    pub admin_password: String,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable         | Default                                  |
    /// |------------------|------------------------------------------|
    /// | `BIND_ADDR`      | `127.0.0.1:3000`                         |
    /// | `DATABASE_URL`   | `postgres://localhost:5432/zhagaram`     |
    /// | `JWT_SECRET`     | generated & persisted to file            |
    /// | `ADMIN_USERNAME` | empty (bootstrap admin disabled)         |
    /// | `ADMIN_PASSWORD` | empty                                    |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into()),
            pg_connection_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/zhagaram".into()),
            jwt_secret: resolve_jwt_secret(),
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or_default(),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_default(),
        }
    }
}
