//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Default access token lifetime: 24 hours, in milliseconds
pub const DEFAULT_ACCESS_TTL_MS: i64 = 86_400_000;

/// Default refresh token lifetime: 7 days, in milliseconds
pub const DEFAULT_REFRESH_TTL_MS: i64 = 604_800_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Secret for HS256 token signing. Every issued token is signed
    /// and verified with this single process-wide secret.
    pub jwt_secret: String,

    /// Access token lifetime in milliseconds
    pub jwt_access_ttl_ms: i64,

    /// Refresh token lifetime in milliseconds
    pub jwt_refresh_ttl_ms: i64,

    /// Runtime configuration
    pub log_level: String,
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET is required"))?,

            jwt_access_ttl_ms: env::var("JWT_ACCESS_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_ACCESS_TTL_MS),
            jwt_refresh_ttl_ms: env::var("JWT_REFRESH_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REFRESH_TTL_MS),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "yachay=debug".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        };

        Ok(config)
    }
}
