//! Mock Profile Store Implementation
//!
//! Keeps profile documents in memory for testing without an external
//! document store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use yachay_auth::Role;

use crate::{ProfileError, ProfileStore, UserProfile};

/// Mock profile store for testing
#[derive(Debug, Clone, Default)]
pub struct MockProfileStore {
    profiles: Arc<Mutex<HashMap<String, UserProfile>>>,
}

impl MockProfileStore {
    /// Create a new mock profile store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get count of stored profiles
    pub fn profile_count(&self) -> usize {
        self.profiles.lock().unwrap().len()
    }

    /// Insert a profile directly, bypassing the uniqueness check.
    /// Test fixtures use this to seed non-default roles and states.
    pub fn seed(&self, profile: UserProfile) {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.user_id.clone(), profile);
    }

    /// Clear all stored profiles
    pub fn clear(&self) {
        self.profiles.lock().unwrap().clear();
    }
}

#[async_trait::async_trait]
impl ProfileStore for MockProfileStore {
    async fn create_profile(&self, profile: &UserProfile) -> Result<(), ProfileError> {
        let mut profiles = self.profiles.lock().unwrap();

        if profiles.contains_key(&profile.user_id) {
            return Err(ProfileError::AlreadyExists);
        }

        tracing::info!(user_id = %profile.user_id, "Mock profile store created profile");
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, ProfileError> {
        Ok(self.profiles.lock().unwrap().get(user_id).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, ProfileError> {
        let mut profiles: Vec<UserProfile> = self.profiles.lock().unwrap().values().cloned().collect();
        profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(profiles)
    }

    async fn update_role(
        &self,
        user_id: &str,
        role: Role,
    ) -> Result<Option<UserProfile>, ProfileError> {
        let mut profiles = self.profiles.lock().unwrap();

        Ok(profiles.get_mut(user_id).map(|profile| {
            profile.role = role;
            profile.updated_at = Utc::now();
            profile.clone()
        }))
    }

    async fn update_status(
        &self,
        user_id: &str,
        active: bool,
    ) -> Result<Option<UserProfile>, ProfileError> {
        let mut profiles = self.profiles.lock().unwrap();

        Ok(profiles.get_mut(user_id).map(|profile| {
            profile.is_active = active;
            profile.updated_at = Utc::now();
            profile.clone()
        }))
    }
}
