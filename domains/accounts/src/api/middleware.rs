//! Accounts domain state

use std::sync::Arc;

use yachay_profiles::ProfileStore;

use crate::domain::service::AuthService;

/// Application state for the Accounts domain
#[derive(Clone)]
pub struct AccountsState {
    pub auth_service: Arc<AuthService>,
    pub profiles: Arc<dyn ProfileStore>,
}
