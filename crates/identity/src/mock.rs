//! Mock Identity Provider Implementation
//!
//! Keeps accounts in memory for testing without an external identity
//! service. Enforces the same unique-email rule as the hosted API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::{IdentityError, IdentityProvider, IdentityRecord, NewIdentity};

#[derive(Debug, Clone)]
struct StoredAccount {
    record: IdentityRecord,
    password: String,
    phone_number: Option<String>,
}

/// Mock identity provider for testing
#[derive(Debug, Clone, Default)]
pub struct MockIdentityProvider {
    accounts: Arc<Mutex<HashMap<String, StoredAccount>>>,
}

impl MockIdentityProvider {
    /// Create a new mock identity provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Get count of registered accounts
    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    /// Get the stored password for an email, if registered
    pub fn stored_password(&self, email: &str) -> Option<String> {
        self.accounts
            .lock()
            .unwrap()
            .values()
            .find(|account| account.record.email.eq_ignore_ascii_case(email))
            .map(|account| account.password.clone())
    }

    /// Get the stored phone number for an email, if registered
    pub fn stored_phone_number(&self, email: &str) -> Option<String> {
        self.accounts
            .lock()
            .unwrap()
            .values()
            .find(|account| account.record.email.eq_ignore_ascii_case(email))
            .and_then(|account| account.phone_number.clone())
    }

    /// Clear all registered accounts
    pub fn clear(&self) {
        self.accounts.lock().unwrap().clear();
    }
}

#[async_trait::async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn create_identity(&self, new: NewIdentity<'_>) -> Result<IdentityRecord, IdentityError> {
        let mut accounts = self.accounts.lock().unwrap();

        let taken = accounts
            .values()
            .any(|account| account.record.email.eq_ignore_ascii_case(new.email));
        if taken {
            return Err(IdentityError::EmailTaken);
        }

        let record = IdentityRecord {
            id: Uuid::new_v4().to_string(),
            email: new.email.to_string(),
            display_name: new.display_name.to_string(),
        };

        tracing::info!(email = %record.email, id = %record.id, "Mock identity provider registered account");

        accounts.insert(
            record.id.clone(),
            StoredAccount {
                record: record.clone(),
                password: new.password.to_string(),
                phone_number: new.phone_number.map(str::to_string),
            },
        );

        Ok(record)
    }

    async fn lookup_by_email(&self, email: &str) -> Result<IdentityRecord, IdentityError> {
        self.accounts
            .lock()
            .unwrap()
            .values()
            .find(|account| account.record.email.eq_ignore_ascii_case(email))
            .map(|account| account.record.clone())
            .ok_or(IdentityError::NotFound)
    }

    async fn lookup_by_id(&self, id: &str) -> Result<IdentityRecord, IdentityError> {
        self.accounts
            .lock()
            .unwrap()
            .get(id)
            .map(|account| account.record.clone())
            .ok_or(IdentityError::NotFound)
    }
}
