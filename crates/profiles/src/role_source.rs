//! Adapter feeding profile roles into the request pipeline

use std::sync::Arc;

use yachay_auth::{RoleSet, RoleSource, RoleSourceError};

use crate::ProfileStore;

/// Resolves a subject's roles from the profile store.
///
/// Deactivated and missing profiles both resolve to `None`, so their
/// tokens stop granting access the moment the profile changes.
pub struct ProfileRoleSource {
    store: Arc<dyn ProfileStore>,
}

impl ProfileRoleSource {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl RoleSource for ProfileRoleSource {
    async fn roles_for(&self, user_id: &str) -> Result<Option<RoleSet>, RoleSourceError> {
        let profile = self
            .store
            .get_profile(user_id)
            .await
            .map_err(|e| RoleSourceError(e.to_string()))?;

        Ok(profile
            .filter(|profile| profile.is_active)
            .map(|profile| RoleSet::from(profile.role)))
    }
}
