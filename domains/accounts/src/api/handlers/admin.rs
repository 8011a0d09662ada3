//! Administration API handlers
//!
//! Implements the admin-only surfaces:
//! - GET /api/admin/dashboard - Admin dashboard
//! - GET /api/admin/users - List every profile
//! - PUT /api/admin/users/{user_id}/role - Change a user's role
//! - PUT /api/admin/users/{user_id}/status - Activate or deactivate a user
//! - GET /api/admin/stats - Account statistics

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use yachay_auth::{Role, ALL_ROLES};
use yachay_profiles::UserProfile;

use crate::api::middleware::AccountsState;

/// Query parameters for a role change
#[derive(Debug, Deserialize)]
pub struct ChangeRoleParams {
    #[serde(rename = "newRole")]
    pub new_role: String,
}

/// Query parameters for a status change
#[derive(Debug, Deserialize)]
pub struct ChangeStatusParams {
    pub active: bool,
}

/// GET /api/admin/dashboard - Admin dashboard
pub async fn admin_dashboard() -> Json<Value> {
    tracing::info!("Serving admin dashboard");

    Json(json!({
        "message": "Dashboard de administración",
        "timestamp": Utc::now().timestamp_millis(),
        "admin": true,
    }))
}

/// GET /api/admin/users - List every profile
pub async fn list_users(
    State(state): State<AccountsState>,
) -> Result<Json<Vec<UserProfile>>, StatusCode> {
    tracing::info!("Admin requesting full user listing");

    match state.profiles.list_profiles().await {
        Ok(profiles) => Ok(Json(profiles)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list profiles");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PUT /api/admin/users/{user_id}/role - Change a user's role.
/// The role code travels as the `newRole` query parameter; unknown
/// codes are rejected instead of silently downgrading to the basic
/// role.
pub async fn change_user_role(
    State(state): State<AccountsState>,
    Path(user_id): Path<String>,
    Query(params): Query<ChangeRoleParams>,
) -> (StatusCode, Json<Value>) {
    tracing::info!(user_id = %user_id, new_role = %params.new_role, "Admin changing user role");

    let Some(role) = Role::try_from_code(&params.new_role) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("Error al cambiar rol: Rol inválido: {}", params.new_role)
            })),
        );
    };

    match state.profiles.update_role(&user_id, role).await {
        Ok(Some(profile)) => (
            StatusCode::OK,
            Json(json!({
                "message": "Rol actualizado exitosamente",
                "user": profile,
            })),
        ),
        Ok(None) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Error al cambiar rol: Usuario no encontrado" })),
        ),
        Err(e) => {
            tracing::error!(error = %e, user_id = %user_id, "Failed to change role");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("Error al cambiar rol: {}", e) })),
            )
        }
    }
}

/// PUT /api/admin/users/{user_id}/status - Activate or deactivate a user
pub async fn change_user_status(
    State(state): State<AccountsState>,
    Path(user_id): Path<String>,
    Query(params): Query<ChangeStatusParams>,
) -> (StatusCode, Json<Value>) {
    tracing::info!(user_id = %user_id, active = %params.active, "Admin changing user status");

    match state.profiles.update_status(&user_id, params.active).await {
        Ok(Some(profile)) => (
            StatusCode::OK,
            Json(json!({
                "message": "Estado del usuario actualizado",
                "user": profile,
            })),
        ),
        Ok(None) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Error al cambiar estado: Usuario no encontrado" })),
        ),
        Err(e) => {
            tracing::error!(error = %e, user_id = %user_id, "Failed to change status");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("Error al cambiar estado: {}", e) })),
            )
        }
    }
}

/// GET /api/admin/stats - Account statistics
pub async fn system_stats(State(state): State<AccountsState>) -> (StatusCode, Json<Value>) {
    tracing::info!("Admin requesting account statistics");

    match state.profiles.list_profiles().await {
        Ok(profiles) => {
            let total = profiles.len();
            let active = profiles.iter().filter(|p| p.is_active).count();
            let admins = profiles.iter().filter(|p| p.role == Role::Admin).count();

            let mut by_role = serde_json::Map::new();
            for role in ALL_ROLES {
                let count = profiles.iter().filter(|p| p.role == role).count();
                by_role.insert(role.code().to_string(), json!(count));
            }

            (
                StatusCode::OK,
                Json(json!({
                    "totalUsers": total,
                    "activeUsers": active,
                    "inactiveUsers": total - active,
                    "adminUsers": admins,
                    "byRole": by_role,
                    "timestamp": Utc::now().timestamp_millis(),
                })),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to compute statistics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Error al obtener estadísticas: {}", e) })),
            )
        }
    }
}
