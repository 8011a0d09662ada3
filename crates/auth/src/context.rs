//! Request identity context

use crate::roles::RoleSet;

/// The caller an access token resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub roles: RoleSet,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, roles: RoleSet) -> Self {
        Self {
            user_id: user_id.into(),
            roles,
        }
    }
}

/// Marker extension the identity resolver inserts into every request.
///
/// `Some` means an access token verified and mapped to an active
/// profile; `None` means the request proceeds unauthenticated. The
/// role gate treats the marker's absence as a mis-composed pipeline,
/// not as an unauthenticated request.
#[derive(Debug, Clone)]
pub struct ResolvedIdentity(pub Option<Identity>);

/// Source of role sets for resolved subjects.
///
/// `Ok(None)` means the subject has no usable profile (unknown or
/// deactivated) and the request continues unauthenticated.
#[async_trait::async_trait]
pub trait RoleSource: Send + Sync {
    async fn roles_for(&self, user_id: &str) -> Result<Option<RoleSet>, RoleSourceError>;
}

/// Opaque role-lookup failure. The resolver logs it and continues
/// unauthenticated; it never surfaces to the caller.
#[derive(Debug, thiserror::Error)]
#[error("role lookup failed: {0}")]
pub struct RoleSourceError(pub String);
