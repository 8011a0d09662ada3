//! Yachay User Profiles
//!
//! User profiles live in an external document store keyed by the
//! identity provider's account id. This crate wraps that store behind
//! a trait with:
//! - HTTP implementation for the hosted document REST API
//! - Mock implementation for testing and development
//!
//! It also provides the adapter that feeds profile roles into the
//! request pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use yachay_auth::{Role, RoleSet};

pub mod http;
pub mod mock;
mod role_source;

pub use role_source::ProfileRoleSource;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Profile store configuration error: {0}")]
    Configuration(String),

    #[error("Profile not found")]
    NotFound,

    #[error("Profile already exists")]
    AlreadyExists,

    #[error("Profile store request error: {0}")]
    Request(String),

    #[error("Profile store response error: {0}")]
    Response(String),
}

/// User profile document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create a new active profile with the default role
    pub fn new(user_id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            email: email.into(),
            name: name.into(),
            role: Role::User,
            profile_image_url: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the role (used when seeding test fixtures)
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// Profile store configuration
#[derive(Debug, Clone)]
pub struct ProfileStoreConfig {
    /// Profile store backend (http, mock)
    pub store: String,
    /// Base URL of the document store REST API
    pub api_url: Option<String>,
    /// API key for the document store REST API
    pub api_key: Option<String>,
}

impl ProfileStoreConfig {
    /// Create profile store config from environment variables
    pub fn from_env() -> Result<Self, ProfileError> {
        dotenvy::dotenv().ok();

        let store = std::env::var("PROFILE_STORE").unwrap_or_else(|_| "mock".to_string());
        let api_url = std::env::var("PROFILE_STORE_URL").ok();
        let api_key = std::env::var("PROFILE_STORE_API_KEY").ok();

        Ok(Self {
            store,
            api_url,
            api_key,
        })
    }
}

/// Profile store trait for different backends
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    /// Store a new profile. Fails with [`ProfileError::AlreadyExists`]
    /// when the subject already has one.
    async fn create_profile(&self, profile: &UserProfile) -> Result<(), ProfileError>;

    /// Fetch a profile. `Ok(None)` for unknown subjects.
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, ProfileError>;

    /// List every stored profile
    async fn list_profiles(&self) -> Result<Vec<UserProfile>, ProfileError>;

    /// Replace the subject's role. `Ok(None)` for unknown subjects.
    async fn update_role(&self, user_id: &str, role: Role) -> Result<Option<UserProfile>, ProfileError>;

    /// Activate or deactivate the subject. `Ok(None)` for unknown subjects.
    async fn update_status(&self, user_id: &str, active: bool) -> Result<Option<UserProfile>, ProfileError>;

    /// Role view of a profile. Fails with [`ProfileError::NotFound`]
    /// for unknown subjects.
    async fn get_roles(&self, user_id: &str) -> Result<RoleSet, ProfileError> {
        let profile = self
            .get_profile(user_id)
            .await?
            .ok_or(ProfileError::NotFound)?;
        Ok(RoleSet::from(profile.role))
    }
}

/// Profile store factory
pub struct ProfileStoreFactory;

impl ProfileStoreFactory {
    /// Create a profile store based on configuration
    pub fn create(config: ProfileStoreConfig) -> Result<Box<dyn ProfileStore>, ProfileError> {
        match config.store.as_str() {
            "http" => {
                tracing::info!("Creating HTTP profile store");
                let store = http::HttpProfileStore::new(config)?;
                Ok(Box::new(store))
            }
            "mock" => {
                tracing::info!("Creating mock profile store");
                Ok(Box::new(mock::MockProfileStore::new()))
            }
            store => Err(ProfileError::Configuration(format!(
                "Unknown profile store: {}. Supported stores: http, mock",
                store
            ))),
        }
    }
}
