//! Authentication flows against the identity provider and profile store

use std::sync::Arc;

use thiserror::Error;

use yachay_auth::{TokenCodec, TokenKind};
use yachay_identity::{IdentityProvider, NewIdentity};
use yachay_profiles::{ProfileStore, UserProfile};

use super::validation::normalize_phone;

/// Failures of the authentication flows. The display strings are the
/// client-facing messages.
#[derive(Error, Debug)]
pub enum AuthFlowError {
    #[error("Error al registrar usuario: {0}")]
    Registration(String),

    #[error("Credenciales inválidas")]
    InvalidCredentials,

    #[error("Token de refresco inválido")]
    InvalidRefresh,

    #[error("Error interno del servidor")]
    Internal(String),
}

/// Outcome of a successful registration, login, or refresh
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
    pub email: String,
    pub display_name: String,
}

/// Orchestrates the authentication flows. Credentials live in the
/// identity provider, roles in the profile store; this service only
/// coordinates the two and issues token pairs.
pub struct AuthService {
    identities: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
    codec: Arc<TokenCodec>,
}

impl AuthService {
    pub fn new(
        identities: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileStore>,
        codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            identities,
            profiles,
            codec,
        }
    }

    /// Register a new account.
    ///
    /// Creates the identity first, then the profile document with the
    /// basic role. A phone number that is not in E.164 form is dropped
    /// rather than failing the registration.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
        phone_number: Option<&str>,
    ) -> Result<AuthSession, AuthFlowError> {
        let phone = normalize_phone(phone_number);

        let record = self
            .identities
            .create_identity(NewIdentity {
                email,
                password,
                display_name,
                phone_number: phone.as_deref(),
            })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, email = %email, "Failed to create identity");
                AuthFlowError::Registration(e.to_string())
            })?;

        let profile = UserProfile::new(
            record.id.clone(),
            record.email.clone(),
            record.display_name.clone(),
        );
        self.profiles.create_profile(&profile).await.map_err(|e| {
            tracing::error!(error = %e, user_id = %record.id, "Failed to store profile for new identity");
            AuthFlowError::Internal(e.to_string())
        })?;

        let pair = self
            .codec
            .issue_pair(&record.id, &record.email)
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %record.id, "Failed to issue token pair");
                AuthFlowError::Internal(e.to_string())
            })?;

        tracing::info!(user_id = %record.id, "User registered successfully");

        Ok(AuthSession {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            user_id: record.id,
            email: record.email,
            display_name: record.display_name,
        })
    }

    /// Authenticate an existing account.
    ///
    /// TODO: check the submitted password against the identity provider
    /// once it exposes a credential verification endpoint; today only
    /// the account lookup gates this flow.
    pub async fn login(&self, email: &str, _password: &str) -> Result<AuthSession, AuthFlowError> {
        let record = self.identities.lookup_by_email(email).await.map_err(|e| {
            tracing::warn!(error = %e, email = %email, "Login lookup failed");
            AuthFlowError::InvalidCredentials
        })?;

        let pair = self
            .codec
            .issue_pair(&record.id, &record.email)
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %record.id, "Failed to issue token pair");
                AuthFlowError::Internal(e.to_string())
            })?;

        tracing::info!(user_id = %record.id, "User authenticated successfully");

        Ok(AuthSession {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            user_id: record.id,
            email: record.email,
            display_name: record.display_name,
        })
    }

    /// Exchange a refresh token for a brand-new pair.
    ///
    /// The caller learns only that the token was rejected, not why.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthFlowError> {
        let claims = self
            .codec
            .verify(refresh_token, TokenKind::Refresh)
            .map_err(|e| {
                tracing::debug!(error = %e, "Refresh token rejected");
                AuthFlowError::InvalidRefresh
            })?;

        let record = self.identities.lookup_by_id(&claims.sub).await.map_err(|e| {
            tracing::warn!(error = %e, user_id = %claims.sub, "Refresh lookup failed");
            AuthFlowError::InvalidRefresh
        })?;

        let pair = self
            .codec
            .issue_pair(&record.id, &record.email)
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %record.id, "Failed to issue token pair");
                AuthFlowError::InvalidRefresh
            })?;

        tracing::info!(user_id = %record.id, "Token pair refreshed");

        Ok(AuthSession {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            user_id: record.id,
            email: record.email,
            display_name: record.display_name,
        })
    }

    /// Acknowledge a logout.
    ///
    /// Tokens are stateless and there is no server-side revocation
    /// list, so this only tells the client to discard its pair. Issued
    /// tokens stay valid until they expire.
    #[mutants::skip] // Only emits a log line; there is no observable state to assert
    pub fn logout(&self, user_id: &str) {
        tracing::info!(user_id = %user_id, "User logged out");
    }

    /// Subject of a verified access token, `None` when verification fails
    pub fn access_token_subject(&self, token: &str) -> Option<String> {
        self.codec
            .verify(token, TokenKind::Access)
            .ok()
            .map(|claims| claims.sub)
    }
}
