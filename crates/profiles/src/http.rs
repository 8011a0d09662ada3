//! HTTP Profile Store Implementation
//!
//! Calls the hosted document store's REST API using the reqwest HTTP
//! client. Documents are keyed by the identity provider's account id.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use yachay_auth::Role;

use crate::{ProfileError, ProfileStore, ProfileStoreConfig, UserProfile};

/// Profile document as stored. Legacy documents may lack a role field,
/// and stored role codes may predate the current role list; both
/// decode as the basic user role.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDocument {
    user_id: String,
    email: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    profile_image_url: Option<String>,
    #[serde(default = "default_active")]
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl From<UserDocument> for UserProfile {
    fn from(document: UserDocument) -> Self {
        let role = document
            .role
            .as_deref()
            .map(Role::from_code)
            .unwrap_or(Role::User);

        UserProfile {
            user_id: document.user_id,
            email: document.email,
            name: document.name,
            role,
            profile_image_url: document.profile_image_url,
            is_active: document.is_active,
            created_at: document.created_at,
            updated_at: document.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UsersResponse {
    users: Vec<UserDocument>,
}

#[derive(Debug, Serialize)]
struct RolePatch {
    role: Role,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusPatch {
    is_active: bool,
}

/// Document store API error response
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// HTTP profile store for the hosted document store
pub struct HttpProfileStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpProfileStore {
    /// Create a new HTTP profile store
    pub fn new(config: ProfileStoreConfig) -> Result<Self, ProfileError> {
        let base_url = config.api_url.ok_or_else(|| {
            ProfileError::Configuration("PROFILE_STORE_URL is required for the http store".to_string())
        })?;
        let api_key = config.api_key.ok_or_else(|| {
            ProfileError::Configuration("PROFILE_STORE_API_KEY is required for the http store".to_string())
        })?;

        Ok(Self {
            client: Client::new(),
            base_url,
            api_key,
        })
    }

    fn users_url(&self) -> String {
        format!("{}/v1/users", self.base_url)
    }

    fn user_url(&self, user_id: &str) -> String {
        format!("{}/v1/users/{}", self.base_url, user_id)
    }

    async fn fail_from(&self, response: reqwest::Response) -> ProfileError {
        let status = response.status();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());

        // Try to parse as API error
        if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_body) {
            return ProfileError::Response(format!(
                "Document store error ({}): {}",
                status, error_response.error.message
            ));
        }

        ProfileError::Response(format!("Document store returned {}: {}", status, error_body))
    }

    /// Shared handling for endpoints where 404 means an absent document
    async fn parse_optional(
        &self,
        response: reqwest::Response,
    ) -> Result<Option<UserProfile>, ProfileError> {
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            return Err(self.fail_from(response).await);
        }

        let document: UserDocument = response
            .json()
            .await
            .map_err(|e| ProfileError::Response(format!("Failed to parse response: {}", e)))?;

        Ok(Some(document.into()))
    }
}

#[async_trait::async_trait]
impl ProfileStore for HttpProfileStore {
    async fn create_profile(&self, profile: &UserProfile) -> Result<(), ProfileError> {
        tracing::debug!(user_id = %profile.user_id, "Storing profile document");

        let response = self
            .client
            .post(self.users_url())
            .header("x-api-key", &self.api_key)
            .json(profile)
            .send()
            .await
            .map_err(|e| ProfileError::Request(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status == reqwest::StatusCode::CONFLICT {
            return Err(ProfileError::AlreadyExists);
        }

        if !status.is_success() {
            return Err(self.fail_from(response).await);
        }

        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, ProfileError> {
        let response = self
            .client
            .get(self.user_url(user_id))
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| ProfileError::Request(format!("HTTP request failed: {}", e)))?;

        self.parse_optional(response).await
    }

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, ProfileError> {
        let response = self
            .client
            .get(self.users_url())
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| ProfileError::Request(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(self.fail_from(response).await);
        }

        let listing: UsersResponse = response
            .json()
            .await
            .map_err(|e| ProfileError::Response(format!("Failed to parse response: {}", e)))?;

        Ok(listing.users.into_iter().map(UserProfile::from).collect())
    }

    async fn update_role(
        &self,
        user_id: &str,
        role: Role,
    ) -> Result<Option<UserProfile>, ProfileError> {
        tracing::debug!(user_id = %user_id, role = %role, "Patching profile role");

        let response = self
            .client
            .patch(self.user_url(user_id))
            .header("x-api-key", &self.api_key)
            .json(&RolePatch { role })
            .send()
            .await
            .map_err(|e| ProfileError::Request(format!("HTTP request failed: {}", e)))?;

        self.parse_optional(response).await
    }

    async fn update_status(
        &self,
        user_id: &str,
        active: bool,
    ) -> Result<Option<UserProfile>, ProfileError> {
        tracing::debug!(user_id = %user_id, active = %active, "Patching profile status");

        let response = self
            .client
            .patch(self.user_url(user_id))
            .header("x-api-key", &self.api_key)
            .json(&StatusPatch { is_active: active })
            .send()
            .await
            .map_err(|e| ProfileError::Request(format!("HTTP request failed: {}", e)))?;

        self.parse_optional(response).await
    }
}
