//! The two-stage request pipeline: identity resolver + role gate
//!
//! The resolver runs first on every request and always attaches a
//! [`ResolvedIdentity`] marker, authenticated or not. The gate runs
//! second and enforces the route policy against that marker. The
//! resolver fails open (a bad token degrades to an unauthenticated
//! request); the gate fails closed (a broken pipeline is a 500, never
//! a pass-through).

use std::sync::Arc;

use axum::{
    extract::{MatchedPath, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::claims::TokenKind;
use crate::codec::{extract_bearer_token, TokenCodec};
use crate::context::{Identity, ResolvedIdentity, RoleSource};
use crate::error::GateRejection;
use crate::policy::RoutePolicy;

/// Shared state for both pipeline stages
#[derive(Clone)]
pub struct AuthState {
    pub codec: Arc<TokenCodec>,
    pub roles: Arc<dyn RoleSource>,
    pub policy: Arc<RoutePolicy>,
}

impl AuthState {
    pub fn new(codec: Arc<TokenCodec>, roles: Arc<dyn RoleSource>, policy: Arc<RoutePolicy>) -> Self {
        Self {
            codec,
            roles,
            policy,
        }
    }
}

/// Identity resolver middleware (fail-open).
///
/// Verifies a bearer access token when one is present and attaches the
/// subject's identity to the request. Every failure path, from a
/// missing header to a role-lookup error, leaves the request
/// unauthenticated and lets it continue. Idempotent: an already
/// attached marker is kept as is.
pub async fn resolve_identity(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    if request.extensions().get::<ResolvedIdentity>().is_none() {
        let identity = authenticate(&state, request.headers()).await;
        request.extensions_mut().insert(ResolvedIdentity(identity));
    }

    next.run(request).await
}

async fn authenticate(state: &AuthState, headers: &HeaderMap) -> Option<Identity> {
    let header = headers.get(AUTHORIZATION)?;
    let token = extract_bearer_token(header)?;

    let claims = match state.codec.verify(&token, TokenKind::Access) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "access token rejected, continuing unauthenticated");
            return None;
        }
    };

    match state.roles.roles_for(&claims.sub).await {
        Ok(Some(roles)) => {
            tracing::debug!(user_id = %claims.sub, roles = %roles, "request identity resolved");
            Some(Identity::new(claims.sub, roles))
        }
        Ok(None) => {
            tracing::debug!(
                user_id = %claims.sub,
                "subject has no active profile, continuing unauthenticated"
            );
            None
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                user_id = %claims.sub,
                "role lookup failed, continuing unauthenticated"
            );
            None
        }
    }
}

/// Role gate middleware (fail-closed).
///
/// Looks up the matched route template in the policy table. Open
/// routes pass untouched. Guarded routes require the resolver's
/// marker: a missing marker means the pipeline is mis-composed and is
/// rejected with 500 rather than silently allowed.
pub async fn enforce_route_policy(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(path) = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
    else {
        // No matched route; the router's fallback produces the 404
        return next.run(request).await;
    };

    let Some(required) = state.policy.required_roles(request.method(), &path) else {
        return next.run(request).await;
    };

    let resolved = request.extensions().get::<ResolvedIdentity>().cloned();
    match resolved {
        None => {
            tracing::error!(path = %path, "role requirement found but identity resolver never ran");
            GateRejection::Internal.into_response()
        }
        Some(ResolvedIdentity(None)) => {
            tracing::debug!(path = %path, "unauthenticated request rejected by role gate");
            GateRejection::Unauthenticated.into_response()
        }
        Some(ResolvedIdentity(Some(identity))) => {
            if identity.roles.satisfies_any(required) {
                next.run(request).await
            } else {
                tracing::warn!(
                    user_id = %identity.user_id,
                    roles = %identity.roles,
                    required = ?required,
                    path = %path,
                    "access denied: insufficient role"
                );
                GateRejection::Forbidden.into_response()
            }
        }
    }
}
