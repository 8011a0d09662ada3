//! Accounts domain: registration, login, token refresh, role-gated surfaces

pub mod api;
pub mod domain;

// Re-export domain types at the crate root for convenience
pub use domain::service::{AuthFlowError, AuthService, AuthSession};

// Re-export API types
pub use api::routes::{route_policy, routes};
pub use api::AccountsState;
