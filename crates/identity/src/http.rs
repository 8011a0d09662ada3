//! HTTP Identity Provider Implementation
//!
//! Calls the hosted identity service's admin REST API using the
//! reqwest HTTP client. Account records live entirely in that service;
//! this client never sees stored credentials.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{IdentityConfig, IdentityError, IdentityProvider, IdentityRecord, NewIdentity};

/// Account creation request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAccountRequest<'a> {
    email: &'a str,
    password: &'a str,
    display_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<&'a str>,
}

/// Account record response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    id: String,
    email: String,
    #[serde(default)]
    display_name: String,
}

impl From<AccountResponse> for IdentityRecord {
    fn from(account: AccountResponse) -> Self {
        IdentityRecord {
            id: account.id,
            email: account.email,
            display_name: account.display_name,
        }
    }
}

/// Identity API error response
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// HTTP identity provider for the hosted identity service
pub struct HttpIdentityProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpIdentityProvider {
    /// Create a new HTTP identity provider
    pub fn new(config: IdentityConfig) -> Result<Self, IdentityError> {
        let base_url = config.api_url.ok_or_else(|| {
            IdentityError::Configuration("IDENTITY_API_URL is required for the http provider".to_string())
        })?;
        let api_key = config.api_key.ok_or_else(|| {
            IdentityError::Configuration("IDENTITY_API_KEY is required for the http provider".to_string())
        })?;

        Ok(Self {
            client: Client::new(),
            base_url,
            api_key,
        })
    }

    async fn parse_account(&self, response: reqwest::Response) -> Result<IdentityRecord, IdentityError> {
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(IdentityError::NotFound);
        }

        if status == reqwest::StatusCode::CONFLICT {
            return Err(IdentityError::EmailTaken);
        }

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());

            // Try to parse as API error
            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_body) {
                return Err(match error_response.error.message.as_str() {
                    "EMAIL_EXISTS" => IdentityError::EmailTaken,
                    "USER_NOT_FOUND" => IdentityError::NotFound,
                    message => IdentityError::Response(format!(
                        "Identity API error ({}): {}",
                        status, message
                    )),
                });
            }

            return Err(IdentityError::Response(format!(
                "Identity API returned {}: {}",
                status, error_body
            )));
        }

        let account: AccountResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Response(format!("Failed to parse response: {}", e)))?;

        Ok(account.into())
    }
}

#[async_trait::async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn create_identity(&self, new: NewIdentity<'_>) -> Result<IdentityRecord, IdentityError> {
        let body = CreateAccountRequest {
            email: new.email,
            password: new.password,
            display_name: new.display_name,
            phone_number: new.phone_number,
        };

        let url = format!("{}/v1/accounts", self.base_url);

        tracing::debug!(email = %new.email, "Creating identity record");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| IdentityError::Request(format!("HTTP request failed: {}", e)))?;

        self.parse_account(response).await
    }

    async fn lookup_by_email(&self, email: &str) -> Result<IdentityRecord, IdentityError> {
        let url = format!("{}/v1/accounts", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("email", email)])
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| IdentityError::Request(format!("HTTP request failed: {}", e)))?;

        self.parse_account(response).await
    }

    async fn lookup_by_id(&self, id: &str) -> Result<IdentityRecord, IdentityError> {
        let url = format!("{}/v1/accounts/{}", self.base_url, id);

        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| IdentityError::Request(format!("HTTP request failed: {}", e)))?;

        self.parse_account(response).await
    }
}
