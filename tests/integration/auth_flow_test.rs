//! Authentication Flow Integration Tests
//!
//! Drives the full register, login, refresh, verify, and logout surface
//! through the real router with mock identity and profile collaborators,
//! validating session payloads and the Spanish wire messages.

use axum::http::StatusCode;
use serde_json::json;

use yachay_accounts::api::handlers::auth::AuthResponse;
use yachay_auth::Role;
use yachay_profiles::ProfileStore;

use crate::common::{body_json, TestApp};

mod common;

#[tokio::test]
async fn test_registration_to_logout_workflow_e2e() {
    println!("\n🚀 === ACCOUNT LIFECYCLE WORKFLOW TEST ===\n");

    // ============================================================================
    // Step 1: Setup application with mock collaborators
    // ============================================================================
    println!("🔧 Step 1: Setting up application...");

    let app = TestApp::new();
    println!("✅ Application ready with empty identity and profile stores");

    // ============================================================================
    // Step 2: Register a new account
    // ============================================================================
    println!("\n📝 Step 2: Registering a new account...");

    let email = "maria@yachay.test";
    let response = app
        .post_json(
            "/api/auth/register",
            None,
            json!({
                "email": email,
                "password": "secret123",
                "displayName": "María Quispe",
                "phoneNumber": "+51987654321"
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let session: AuthResponse = serde_json::from_value(body_json(response).await).unwrap();

    assert!(session.success, "Registration should succeed");
    assert_eq!(session.message, "Autenticación exitosa");
    assert!(session.token.is_some(), "Should issue an access token");
    assert!(session.refresh_token.is_some(), "Should issue a refresh token");
    assert_eq!(session.email.as_deref(), Some(email));

    let user_id = session.user_id.clone().unwrap();
    let access_token = session.token.clone().unwrap();
    let refresh_token = session.refresh_token.clone().unwrap();

    println!("✅ Account registered: {} ({})", email, user_id);

    // ============================================================================
    // Step 3: Verify the identity and profile documents exist
    // ============================================================================
    println!("\n🔍 Step 3: Verifying stored identity and profile...");

    assert_eq!(app.identities.account_count(), 1);
    assert_eq!(
        app.identities.stored_phone_number(email).as_deref(),
        Some("+51987654321")
    );

    let profile = app
        .profiles
        .get_profile(&user_id)
        .await
        .unwrap()
        .expect("profile document should exist after registration");
    assert_eq!(profile.role, Role::User, "New accounts get the basic role");
    assert!(profile.is_active);

    println!("✅ Identity and profile stored, role = {}", profile.role);

    // ============================================================================
    // Step 4: Use the access token against guarded surfaces
    // ============================================================================
    println!("\n🔐 Step 4: Using the access token on guarded surfaces...");

    let response = app.get("/api/user/dashboard", Some(&access_token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.get("/api/users/me", Some(&access_token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["email"], email);
    assert_eq!(me["role"], "USER");

    println!("✅ Fresh token accepted by the guarded surfaces");

    // ============================================================================
    // Step 5: Login with the registered email
    // ============================================================================
    println!("\n🔑 Step 5: Logging in again...");

    let response = app
        .post_json(
            "/api/auth/login",
            None,
            json!({ "email": email, "password": "secret123" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let login: AuthResponse = serde_json::from_value(body_json(response).await).unwrap();
    assert!(login.success);
    assert_eq!(login.user_id.as_deref(), Some(user_id.as_str()));

    println!("✅ Login issued a session for the same subject");

    // ============================================================================
    // Step 6: Exchange the refresh token for a new pair
    // ============================================================================
    println!("\n🔄 Step 6: Refreshing the token pair...");

    let response = app.post("/api/auth/refresh", Some(&refresh_token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let refreshed: AuthResponse = serde_json::from_value(body_json(response).await).unwrap();
    assert!(refreshed.success);
    assert_eq!(refreshed.user_id.as_deref(), Some(user_id.as_str()));
    assert!(refreshed.token.is_some());
    assert!(refreshed.refresh_token.is_some());

    println!("✅ Refresh produced a new pair for the same subject");

    // ============================================================================
    // Step 7: Verify the access token
    // ============================================================================
    println!("\n🧾 Step 7: Verifying the access token...");

    let response = app.get("/api/auth/verify", Some(&access_token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let verified = body_json(response).await;
    assert_eq!(verified["message"], "Token válido");
    assert_eq!(verified["userId"], user_id);

    println!("✅ Token verified");

    // ============================================================================
    // Step 8: Logout
    // ============================================================================
    println!("\n👋 Step 8: Logging out...");

    let response = app.post("/api/auth/logout", Some(&access_token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let goodbye = body_json(response).await;
    assert_eq!(goodbye["message"], "Sesión cerrada exitosamente");
    assert_eq!(goodbye["success"], true);

    println!("✅ Session closed");
    println!("\n🎉 === ACCOUNT LIFECYCLE WORKFLOW COMPLETE ===\n");
}

#[tokio::test]
async fn test_register_drops_malformed_phone_number() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/auth/register",
            None,
            json!({
                "email": "jose@yachay.test",
                "password": "secret123",
                "displayName": "José",
                "phoneNumber": "123456"
            }),
        )
        .await;

    // A bad phone number never fails the registration, it is just dropped
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);

    assert_eq!(app.identities.stored_phone_number("jose@yachay.test"), None);
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let app = TestApp::new();

    let payload = json!({
        "email": "rosa@yachay.test",
        "password": "secret123",
        "displayName": "Rosa"
    });

    let response = app.post_json("/api/auth/register", None, payload.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.post_json("/api/auth/register", None, payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "Error al registrar usuario: Email already registered"
    );
}

#[tokio::test]
async fn test_register_rejects_invalid_payloads() {
    let app = TestApp::new();

    let cases = vec![
        json!({ "email": "not-an-email", "password": "secret123", "displayName": "Ana" }),
        json!({ "email": "ana@yachay.test", "password": "12345", "displayName": "Ana" }),
        json!({ "email": "ana@yachay.test", "password": "secret123", "displayName": "" }),
    ];

    for payload in cases {
        let response = app.post_json("/api/auth/register", None, payload.clone()).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "Payload should be rejected: {payload}"
        );
    }

    // Nothing was stored for any rejected attempt
    assert_eq!(app.identities.account_count(), 0);
    assert_eq!(app.profiles.profile_count(), 0);
}

#[tokio::test]
async fn test_login_unknown_email_rejected() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/auth/login",
            None,
            json!({ "email": "nadie@yachay.test", "password": "whatever" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Credenciales inválidas");
}

#[tokio::test]
async fn test_refresh_requires_refresh_token() {
    let app = TestApp::new();
    let fixture = app.seed_user(Role::User);

    // No header at all
    let response = app.post("/api/auth/refresh", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Token de refresco requerido");

    // An access token is not accepted in place of a refresh token
    let response = app.post("/api/auth/refresh", Some(&fixture.token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Token de refresco inválido");

    // The real refresh token works
    let refresh_token = app.refresh_token_for(&fixture);
    let response = app.post("/api/auth/refresh", Some(&refresh_token)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_requires_valid_token() {
    let app = TestApp::new();

    let response = app.post("/api/auth/logout", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Token requerido");

    let response = app.post("/api/auth/logout", Some("garbage.token.here")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Token inválido");
}

#[tokio::test]
async fn test_verify_without_token_reports_api_alive() {
    let app = TestApp::new();

    let response = app.get("/api/auth/verify", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "API funcionando correctamente");
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_verify_rejects_tampered_token() {
    let app = TestApp::new();

    let response = app.get("/api/auth/verify", Some("not-a-token")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Token inválido");
}
