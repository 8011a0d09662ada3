//! Route definitions and role policy for the Accounts domain API

use axum::{
    routing::{get, post, put},
    Router,
};

use yachay_auth::{Role, RoutePolicy};

use super::handlers::{admin, auth, dashboards, profile};
use super::middleware::AccountsState;

/// Create authentication routes
fn auth_routes() -> Router<AccountsState> {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/verify", get(auth::verify))
}

/// Create administration routes
fn admin_routes() -> Router<AccountsState> {
    Router::new()
        .route("/api/admin/dashboard", get(admin::admin_dashboard))
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/users/{user_id}/role", put(admin::change_user_role))
        .route(
            "/api/admin/users/{user_id}/status",
            put(admin::change_user_status),
        )
        .route("/api/admin/stats", get(admin::system_stats))
}

/// Create role-gated dashboard routes
fn dashboard_routes() -> Router<AccountsState> {
    Router::new()
        .route("/api/user/dashboard", get(dashboards::user_dashboard))
        .route("/api/moderator/dashboard", get(dashboards::moderator_dashboard))
        .route("/api/premium/dashboard", get(dashboards::premium_dashboard))
}

/// Create current-user routes
fn profile_routes() -> Router<AccountsState> {
    Router::new().route("/api/users/me", get(profile::me))
}

/// Create all Accounts domain API routes
pub fn routes() -> Router<AccountsState> {
    Router::new()
        .merge(auth_routes())
        .merge(admin_routes())
        .merge(dashboard_routes())
        .merge(profile_routes())
}

/// Role requirements for the Accounts domain surfaces.
///
/// Everything outside these prefixes stays open; `/api/users/me`
/// authenticates through its extractor instead of a table entry.
pub fn route_policy() -> RoutePolicy {
    RoutePolicy::builder()
        .prefix("/api/admin", &[Role::Admin])
        .prefix("/api/moderator", &[Role::Moderator, Role::Admin])
        .prefix("/api/premium", &[Role::Premium, Role::Admin])
        .prefix("/api/user", &[Role::User])
        .build()
}
