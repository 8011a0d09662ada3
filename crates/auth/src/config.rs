//! Token codec configuration

/// Token codec configuration.
///
/// One process-wide HS256 secret signs and verifies every token.
/// Lifetimes are kept in milliseconds and may be negative, which
/// produces tokens that are already expired at issuance.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub access_ttl_ms: i64,
    pub refresh_ttl_ms: i64,
}
