//! Authentication API handlers
//!
//! Implements the account flows:
//! - POST /api/auth/register - Register a new account
//! - POST /api/auth/login - Authenticate an existing account
//! - POST /api/auth/refresh - Exchange a refresh token for a new pair
//! - POST /api/auth/logout - Acknowledge a client logout
//! - GET /api/auth/verify - Check an access token

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use yachay_auth::extract_bearer_token;
use yachay_common::ValidatedJson;

use crate::api::middleware::AccountsState;
use crate::domain::service::AuthSession;

/// Request for account registration
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6))]
    pub password: String,

    #[validate(length(min = 1, max = 100))]
    pub display_name: String,

    pub phone_number: Option<String>,
}

/// Request for login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Response for all authentication operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub message: String,
    pub success: bool,
}

impl AuthResponse {
    /// Acknowledgment without session data
    pub fn ack(message: impl Into<String>) -> Self {
        Self {
            token: None,
            refresh_token: None,
            user_id: None,
            email: None,
            display_name: None,
            message: message.into(),
            success: true,
        }
    }

    /// Failure with a client-facing message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::ack(message)
        }
    }
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: Some(session.access_token),
            refresh_token: Some(session.refresh_token),
            user_id: Some(session.user_id),
            email: Some(session.email),
            display_name: Some(session.display_name),
            message: "Autenticación exitosa".to_string(),
            success: true,
        }
    }
}

/// POST /api/auth/register - Register a new account
pub async fn register(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> (StatusCode, Json<AuthResponse>) {
    tracing::info!(email = %request.email, "Registering new user");

    match state
        .auth_service
        .register(
            &request.email,
            &request.password,
            &request.display_name,
            request.phone_number.as_deref(),
        )
        .await
    {
        Ok(session) => (StatusCode::OK, Json(AuthResponse::from(session))),
        Err(e) => (StatusCode::BAD_REQUEST, Json(AuthResponse::error(e.to_string()))),
    }
}

/// POST /api/auth/login - Authenticate an existing account
pub async fn login(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> (StatusCode, Json<AuthResponse>) {
    tracing::info!(email = %request.email, "Authenticating user");

    match state.auth_service.login(&request.email, &request.password).await {
        Ok(session) => (StatusCode::OK, Json(AuthResponse::from(session))),
        Err(e) => (StatusCode::BAD_REQUEST, Json(AuthResponse::error(e.to_string()))),
    }
}

/// POST /api/auth/refresh - Exchange a refresh token for a new pair.
/// The refresh token travels in the Authorization header.
pub async fn refresh(
    State(state): State<AccountsState>,
    headers: HeaderMap,
) -> (StatusCode, Json<AuthResponse>) {
    tracing::info!("Refreshing token pair");

    let Some(token) = headers.get(AUTHORIZATION).and_then(extract_bearer_token) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::error("Token de refresco requerido")),
        );
    };

    match state.auth_service.refresh(&token).await {
        Ok(session) => (StatusCode::OK, Json(AuthResponse::from(session))),
        Err(e) => (StatusCode::BAD_REQUEST, Json(AuthResponse::error(e.to_string()))),
    }
}

/// POST /api/auth/logout - Acknowledge a client logout
pub async fn logout(
    State(state): State<AccountsState>,
    headers: HeaderMap,
) -> (StatusCode, Json<AuthResponse>) {
    tracing::info!("Closing session");

    let Some(token) = headers.get(AUTHORIZATION).and_then(extract_bearer_token) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::error("Token requerido")),
        );
    };

    let Some(user_id) = state.auth_service.access_token_subject(&token) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::error("Token inválido")),
        );
    };

    state.auth_service.logout(&user_id);

    (
        StatusCode::OK,
        Json(AuthResponse::ack("Sesión cerrada exitosamente")),
    )
}

/// GET /api/auth/verify - Check an access token.
/// Without a bearer header this only confirms the API is reachable.
pub async fn verify(
    State(state): State<AccountsState>,
    headers: HeaderMap,
) -> (StatusCode, Json<AuthResponse>) {
    tracing::info!("Verifying token");

    let Some(token) = headers.get(AUTHORIZATION).and_then(extract_bearer_token) else {
        return (
            StatusCode::OK,
            Json(AuthResponse::ack("API funcionando correctamente")),
        );
    };

    match state.auth_service.access_token_subject(&token) {
        Some(user_id) => (
            StatusCode::OK,
            Json(AuthResponse {
                user_id: Some(user_id),
                ..AuthResponse::ack("Token válido")
            }),
        ),
        None => (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::error("Token inválido")),
        ),
    }
}
