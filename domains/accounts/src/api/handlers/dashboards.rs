//! Role-gated dashboard handlers
//!
//! The route policy admits these; the handlers themselves only render
//! the static dashboard payloads.

use axum::response::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// GET /api/user/dashboard - Basic user dashboard
pub async fn user_dashboard() -> Json<Value> {
    tracing::info!("Serving basic user dashboard");

    Json(json!({
        "message": "Dashboard de Usuario",
        "timestamp": Utc::now().timestamp_millis(),
        "user": true,
        "functions": [
            "Explorar contenido cultural básico",
            "Ver tours públicos",
            "Comentar y calificar",
            "Guardar favoritos",
            "Acceso limitado a AR",
        ],
        "upgradeMessage": "¡Actualiza a Premium para más funciones!",
    }))
}

/// GET /api/moderator/dashboard - Moderation dashboard
pub async fn moderator_dashboard() -> Json<Value> {
    tracing::info!("Serving moderation dashboard");

    Json(json!({
        "message": "Dashboard de Moderación",
        "timestamp": Utc::now().timestamp_millis(),
        "moderator": true,
        "functions": [
            "Moderar comentarios",
            "Revisar contenido reportado",
            "Gestionar usuarios problemáticos",
            "Aprobar contenido cultural",
        ],
    }))
}

/// GET /api/premium/dashboard - Premium dashboard
pub async fn premium_dashboard() -> Json<Value> {
    tracing::info!("Serving premium dashboard");

    Json(json!({
        "message": "Dashboard Premium",
        "timestamp": Utc::now().timestamp_millis(),
        "premium": true,
        "functions": [
            "Acceso a tours exclusivos",
            "Contenido cultural premium",
            "Reservas prioritarias",
            "Soporte VIP",
            "Experiencias AR avanzadas",
            "Descargas ilimitadas",
        ],
    }))
}
