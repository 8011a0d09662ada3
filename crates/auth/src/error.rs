//! Authentication and authorization errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::claims::TokenKind;

/// Token codec error.
///
/// Callers outside the codec generally collapse these into a single
/// "invalid token" outcome; the variants exist for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token kind mismatch: expected {expected}, found {found}")]
    WrongKind {
        expected: TokenKind,
        found: TokenKind,
    },

    #[error("token is malformed")]
    Malformed,

    #[error("token issuance failed")]
    Issuance,
}

/// Rejection produced by the role gate and the `CurrentUser` extractor.
///
/// Bodies are part of the wire contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    /// A role requirement exists but the request carries no identity
    Unauthenticated,
    /// The identity's roles satisfy none of the required roles
    Forbidden,
    /// The pipeline was mis-composed or evaluation failed unexpectedly
    Internal,
}

impl GateRejection {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GateRejection::Unauthenticated => StatusCode::UNAUTHORIZED,
            GateRejection::Forbidden => StatusCode::FORBIDDEN,
            GateRejection::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            GateRejection::Unauthenticated => "Usuario no autenticado",
            GateRejection::Forbidden => "Acceso denegado: Rol insuficiente",
            GateRejection::Internal => "Error interno en el filtro de autorización",
        }
    }
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message(),
        }));

        (self.status_code(), body).into_response()
    }
}
