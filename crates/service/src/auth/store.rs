use async_trait::async_trait;
use thiserror::Error;

use super::domain::Account;
use super::errors::ConflictField;

/// Failures surfaced by an account-store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A store-level uniqueness constraint rejected the write. This is the
    /// authoritative duplicate check; the orchestrator's pre-checks only
    /// narrow the window.
    #[error("{0} already in use")]
    Duplicate(ConflictField),
    #[error("account store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence abstraction the orchestrator consumes. Implementations must
/// be usable under concurrent callers, with uniqueness enforced at the
/// store level.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;
    async fn create(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<Account, StoreError>;
}

/// Simple in-memory store for tests, doc examples, and benches.
pub mod memory {
    use super::*;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MemoryStore {
        accounts: Mutex<Vec<Account>>,
    }

    #[async_trait]
    impl AccountStore for MemoryStore {
        async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.iter().find(|a| a.email == email).cloned())
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.iter().find(|a| a.username == username).cloned())
        }

        async fn create(
            &self,
            email: &str,
            username: &str,
            password_hash: &str,
        ) -> Result<Account, StoreError> {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.iter().any(|a| a.email == email) {
                return Err(StoreError::Duplicate(ConflictField::Email));
            }
            if accounts.iter().any(|a| a.username == username) {
                return Err(StoreError::Duplicate(ConflictField::Username));
            }
            let account = Account {
                id: Uuid::new_v4(),
                email: email.to_string(),
                username: username.to_string(),
                password_hash: password_hash.to_string(),
            };
            accounts.push(account.clone());
            Ok(account)
        }
    }
}
