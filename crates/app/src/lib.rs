//! Yachay application composition root
//!
//! Composes the accounts domain router with the authentication
//! pipeline into a single application.

use std::sync::Arc;

use axum::{middleware, Router};
use tower::ServiceBuilder;

use yachay_accounts::{AccountsState, AuthService};
use yachay_auth::{enforce_route_policy, resolve_identity, AuthState, TokenCodec, TokenConfig};
use yachay_common::Config;
use yachay_identity::IdentityProvider;
use yachay_profiles::{ProfileRoleSource, ProfileStore};

/// Create the main application router with all routes and middleware.
///
/// The identity resolver wraps the role gate, so every request carries
/// a resolution marker before the gate decides anything.
pub fn create_app(
    config: &Config,
    identities: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
) -> Router {
    let codec = Arc::new(TokenCodec::new(&TokenConfig {
        secret: config.jwt_secret.clone(),
        access_ttl_ms: config.jwt_access_ttl_ms,
        refresh_ttl_ms: config.jwt_refresh_ttl_ms,
    }));

    let auth_service = Arc::new(AuthService::new(
        identities,
        profiles.clone(),
        codec.clone(),
    ));
    let accounts_state = AccountsState {
        auth_service,
        profiles: profiles.clone(),
    };

    let auth_state = AuthState::new(
        codec,
        Arc::new(ProfileRoleSource::new(profiles)),
        Arc::new(yachay_accounts::route_policy()),
    );

    // Build router, then wrap it in the two-stage pipeline
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Yachay API v0.0.1-SNAPSHOT" }),
        )
        .merge(yachay_accounts::routes().with_state(accounts_state))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn_with_state(
                    auth_state.clone(),
                    resolve_identity,
                ))
                .layer(middleware::from_fn_with_state(
                    auth_state,
                    enforce_route_policy,
                )),
        )
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
