//! Authentication and authorization pipeline for the Yachay API
//!
//! Provides the HS256 token codec, the role model, the static route
//! policy table, and the two axum middleware stages (identity resolver
//! and role gate) that guard the HTTP surface.

mod claims;
mod codec;
mod config;
mod context;
mod error;
mod extractors;
mod middleware;
mod policy;
mod roles;

pub use claims::{Claims, TokenKind};
pub use codec::{extract_bearer_token, TokenCodec, TokenPair};
pub use config::TokenConfig;
pub use context::{Identity, ResolvedIdentity, RoleSource, RoleSourceError};
pub use error::{GateRejection, TokenError};
pub use extractors::CurrentUser;
pub use middleware::{enforce_route_policy, resolve_identity, AuthState};
pub use policy::{RoutePolicy, RoutePolicyBuilder};
pub use roles::{Role, RoleSet, ALL_ROLES};
