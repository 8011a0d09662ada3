//! Admin Management Integration Tests
//!
//! Covers the admin-only management surface: listing users, changing roles
//! and activation status, and account statistics. Role and status changes
//! take effect against outstanding tokens immediately because the gate
//! reads roles from the profile store on every request.

use axum::http::StatusCode;

use yachay_auth::Role;

use crate::common::{assertions, body_json, TestApp};

mod common;

#[tokio::test]
async fn test_admin_lists_every_profile() {
    let app = TestApp::new();
    let admin = app.seed_user(Role::Admin);
    app.seed_user(Role::User);
    app.seed_user(Role::Guide);

    let response = app.get("/api/admin/users", Some(&admin.token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let users = body.as_array().expect("listing should be a JSON array");
    assert_eq!(users.len(), 3);

    // Profile documents keep their camelCase wire names in the listing
    for user in users {
        assert!(user.get("userId").is_some());
        assert!(user.get("isActive").is_some());
        assert!(user.get("role").is_some());
    }
}

#[tokio::test]
async fn test_role_promotion_reaches_the_gate_immediately() {
    let app = TestApp::new();
    let admin = app.seed_user(Role::Admin);
    let user = app.seed_user(Role::User);

    let response = app.get("/api/premium/dashboard", Some(&user.token)).await;
    assertions::assert_forbidden(response).await;

    let uri = format!("/api/admin/users/{}/role?newRole=PREMIUM", user.user_id());
    let response = app.put(&uri, Some(&admin.token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Rol actualizado exitosamente");
    assert_eq!(body["user"]["role"], "PREMIUM");

    // Same token, new outcome: roles live in the profile store, not in
    // the token
    let response = app.get("/api/premium/dashboard", Some(&user.token)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_role_change_normalizes_transport_codes() {
    let app = TestApp::new();
    let admin = app.seed_user(Role::Admin);
    let user = app.seed_user(Role::User);

    // Prefixed uppercase form
    let uri = format!("/api/admin/users/{}/role?newRole=ROLE_MODERATOR", user.user_id());
    let response = app.put(&uri, Some(&admin.token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["role"], "MODERATOR");

    // Bare lowercase form
    let uri = format!("/api/admin/users/{}/role?newRole=guide", user.user_id());
    let response = app.put(&uri, Some(&admin.token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["role"], "GUIDE");
}

#[tokio::test]
async fn test_role_change_rejects_unknown_code() {
    let app = TestApp::new();
    let admin = app.seed_user(Role::Admin);
    let user = app.seed_user(Role::User);

    let uri = format!("/api/admin/users/{}/role?newRole=SUPERUSER", user.user_id());
    let response = app.put(&uri, Some(&admin.token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Error al cambiar rol: Rol inválido: SUPERUSER");

    // The profile keeps its previous role
    let response = app.get("/api/admin/users", Some(&admin.token)).await;
    let listing = body_json(response).await;
    let target = listing
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["userId"] == user.user_id())
        .expect("target user should still be listed")
        .clone();
    assert_eq!(target["role"], "USER");
}

#[tokio::test]
async fn test_role_change_unknown_user_rejected() {
    let app = TestApp::new();
    let admin = app.seed_user(Role::Admin);

    let response = app
        .put("/api/admin/users/missing-id/role?newRole=PREMIUM", Some(&admin.token))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Error al cambiar rol: Usuario no encontrado");
}

#[tokio::test]
async fn test_deactivation_locks_out_outstanding_tokens() {
    let app = TestApp::new();
    let admin = app.seed_user(Role::Admin);
    let moderator = app.seed_user(Role::Moderator);

    let response = app.get("/api/moderator/dashboard", Some(&moderator.token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Deactivate
    let uri = format!("/api/admin/users/{}/status?active=false", moderator.user_id());
    let response = app.put(&uri, Some(&admin.token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Estado del usuario actualizado");
    assert_eq!(body["user"]["isActive"], false);

    // The still-valid token no longer authenticates
    let response = app.get("/api/moderator/dashboard", Some(&moderator.token)).await;
    assertions::assert_unauthenticated(response).await;

    // Reactivate and access returns
    let uri = format!("/api/admin/users/{}/status?active=true", moderator.user_id());
    let response = app.put(&uri, Some(&admin.token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.get("/api/moderator/dashboard", Some(&moderator.token)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_status_change_unknown_user_rejected() {
    let app = TestApp::new();
    let admin = app.seed_user(Role::Admin);

    let response = app
        .put("/api/admin/users/missing-id/status?active=false", Some(&admin.token))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Error al cambiar estado: Usuario no encontrado");
}

#[tokio::test]
async fn test_stats_reflect_seeded_accounts() {
    let app = TestApp::new();
    let admin = app.seed_user(Role::Admin);
    app.seed_user(Role::User);
    app.seed_inactive_user(Role::User);
    app.seed_user(Role::Premium);

    let response = app.get("/api/admin/stats", Some(&admin.token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let stats = body_json(response).await;
    assert_eq!(stats["totalUsers"], 4);
    assert_eq!(stats["activeUsers"], 3);
    assert_eq!(stats["inactiveUsers"], 1);
    assert_eq!(stats["adminUsers"], 1);
    assert_eq!(stats["byRole"]["USER"], 2);
    assert_eq!(stats["byRole"]["ADMIN"], 1);
    assert_eq!(stats["byRole"]["PREMIUM"], 1);
    assert_eq!(stats["byRole"]["MODERATOR"], 0);

    assertions::assert_timestamp_recent(stats["timestamp"].as_i64().unwrap());
}

#[tokio::test]
async fn test_management_surface_requires_admin() {
    let app = TestApp::new();
    let moderator = app.seed_user(Role::Moderator);
    let user = app.seed_user(Role::User);

    let response = app.get("/api/admin/users", Some(&moderator.token)).await;
    assertions::assert_forbidden(response).await;

    let uri = format!("/api/admin/users/{}/role?newRole=ADMIN", user.user_id());
    let response = app.put(&uri, Some(&moderator.token)).await;
    assertions::assert_forbidden(response).await;

    let response = app.get("/api/admin/stats", Some(&user.token)).await;
    assertions::assert_forbidden(response).await;
}
