//! Handler-level extractor for the resolved identity

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::context::{Identity, ResolvedIdentity};
use crate::error::GateRejection;

/// Extracts the authenticated caller from the request.
///
/// Use in handlers whose routes the gate already guards, or wherever a
/// handler wants to require authentication without a role rule.
/// Rejects with 401 for anonymous requests and with 500 when the
/// identity resolver is not mounted.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = GateRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<ResolvedIdentity>() {
            Some(ResolvedIdentity(Some(identity))) => Ok(CurrentUser(identity.clone())),
            Some(ResolvedIdentity(None)) => Err(GateRejection::Unauthenticated),
            None => {
                tracing::error!("CurrentUser extractor used without the identity resolver");
                Err(GateRejection::Internal)
            }
        }
    }
}
