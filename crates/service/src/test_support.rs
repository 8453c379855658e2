#![cfg(test)]
//! Shared helpers for service tests.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::auth::store::memory::MemoryStore;
use crate::auth::store::AccountStore;
use crate::auth::AuthService;
use crate::password::{HashParams, PasswordHasher};
use crate::token::TokenService;

pub const TEST_SECRET: &str = "test-signing-secret";

static LOGGING: OnceCell<()> = OnceCell::new();

/// Initialize tracing output once for the whole test process.
pub fn init() {
    LOGGING.get_or_init(|| {
        common::utils::logging::init_logging_default();
    });
}

/// Low-cost parameters so orchestrator tests stay fast; encoding and
/// verification behavior is identical to the production defaults.
pub fn fast_params() -> HashParams {
    HashParams { memory_kib: 1024, iterations: 1, parallelism: 1, key_length: 32 }
}

pub fn service() -> AuthService<MemoryStore> {
    service_with(Arc::new(MemoryStore::default()))
}

pub fn service_with<S: AccountStore>(store: Arc<S>) -> AuthService<S> {
    init();
    AuthService::new(
        store,
        PasswordHasher::new(fast_params()),
        TokenService::new(TEST_SECRET).unwrap(),
        Duration::from_secs(3600),
    )
}

pub fn token_service() -> TokenService {
    TokenService::new(TEST_SECRET).unwrap()
}
