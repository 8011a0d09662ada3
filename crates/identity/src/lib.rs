//! Yachay Identity Provider
//!
//! Credential storage lives in an external identity service, not in
//! this codebase. This crate wraps that service behind a trait with:
//! - HTTP implementation for the hosted identity REST API
//! - Mock implementation for testing and development

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod http;
pub mod mock;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Identity configuration error: {0}")]
    Configuration(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Identity not found")]
    NotFound,

    #[error("Identity request error: {0}")]
    Request(String),

    #[error("Identity response error: {0}")]
    Response(String),
}

/// Account record held by the identity service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

/// Data for registering a new account
#[derive(Debug, Clone)]
pub struct NewIdentity<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub display_name: &'a str,
    /// E.164 phone number, already normalized by the caller
    pub phone_number: Option<&'a str>,
}

/// Identity provider configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Identity provider backend (http, mock)
    pub provider: String,
    /// Base URL of the identity REST API
    pub api_url: Option<String>,
    /// API key for the identity REST API
    pub api_key: Option<String>,
}

impl IdentityConfig {
    /// Create identity config from environment variables
    pub fn from_env() -> Result<Self, IdentityError> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("IDENTITY_PROVIDER").unwrap_or_else(|_| "mock".to_string());
        let api_url = std::env::var("IDENTITY_API_URL").ok();
        let api_key = std::env::var("IDENTITY_API_KEY").ok();

        Ok(Self {
            provider,
            api_url,
            api_key,
        })
    }
}

/// Identity provider trait for different backends
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new account. Fails with [`IdentityError::EmailTaken`]
    /// when the email is already registered.
    async fn create_identity(&self, new: NewIdentity<'_>) -> Result<IdentityRecord, IdentityError>;

    /// Look up an account by email
    async fn lookup_by_email(&self, email: &str) -> Result<IdentityRecord, IdentityError>;

    /// Look up an account by its provider-assigned id
    async fn lookup_by_id(&self, id: &str) -> Result<IdentityRecord, IdentityError>;
}

/// Identity provider factory
pub struct IdentityProviderFactory;

impl IdentityProviderFactory {
    /// Create an identity provider based on configuration
    pub fn create(config: IdentityConfig) -> Result<Box<dyn IdentityProvider>, IdentityError> {
        match config.provider.as_str() {
            "http" => {
                tracing::info!("Creating HTTP identity provider");
                let provider = http::HttpIdentityProvider::new(config)?;
                Ok(Box::new(provider))
            }
            "mock" => {
                tracing::info!("Creating mock identity provider");
                Ok(Box::new(mock::MockIdentityProvider::new()))
            }
            provider => Err(IdentityError::Configuration(format!(
                "Unknown identity provider: {}. Supported providers: http, mock",
                provider
            ))),
        }
    }
}
