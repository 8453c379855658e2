use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use tracing::{debug, error, info, instrument};

use crate::password::{HashParams, PasswordHasher};
use crate::token::TokenService;

use super::domain::{AccountInfo, AuthSession, LoginInput, RegisterInput};
use super::errors::{AuthError, ConflictField};
use super::store::{AccountStore, StoreError};
use super::strength::PasswordStrength;

/// Credential orchestrator: the register/login control flow over an account
/// store, the password hasher, and the token service.
pub struct AuthService<S: AccountStore> {
    store: Arc<S>,
    hasher: PasswordHasher,
    tokens: TokenService,
    token_ttl: Duration,
}

impl<S: AccountStore> AuthService<S> {
    pub fn new(
        store: Arc<S>,
        hasher: PasswordHasher,
        tokens: TokenService,
        token_ttl: Duration,
    ) -> Self {
        Self { store, hasher, tokens, token_ttl }
    }

    /// Wire up the hasher and token service from validated configuration.
    /// An empty signing secret fails here; nothing else about construction
    /// can fail.
    pub fn from_config(store: Arc<S>, cfg: &configs::AppConfig) -> anyhow::Result<Self> {
        let tokens = TokenService::new(cfg.token.secret.expose_secret())?;
        Ok(Self::new(
            store,
            PasswordHasher::new(HashParams::from(&cfg.password)),
            tokens,
            Duration::from_secs(cfg.token.ttl_secs),
        ))
    }

    /// Register a new account with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    /// use service::auth::domain::RegisterInput;
    /// use service::auth::store::memory::MemoryStore;
    /// use service::auth::AuthService;
    /// use service::password::PasswordHasher;
    /// use service::token::TokenService;
    ///
    /// let svc = AuthService::new(
    ///     Arc::new(MemoryStore::default()),
    ///     PasswordHasher::default(),
    ///     TokenService::new("doc-secret").unwrap(),
    ///     Duration::from_secs(3600),
    /// );
    /// let input = RegisterInput {
    ///     email: "user@example.com".into(),
    ///     username: "user".into(),
    ///     password: "Secret123".into(),
    /// };
    /// let account = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(account.email, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email, username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<AccountInfo, AuthError> {
        if input.email.is_empty() || input.username.is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation(
                "email, username and password are required".into(),
            ));
        }

        if self
            .store
            .find_by_email(&input.email)
            .await
            .map_err(store_failure)?
            .is_some()
        {
            debug!("email already registered");
            return Err(AuthError::Conflict(ConflictField::Email));
        }
        if self
            .store
            .find_by_username(&input.username)
            .await
            .map_err(store_failure)?
            .is_some()
        {
            debug!("username already taken");
            return Err(AuthError::Conflict(ConflictField::Username));
        }

        if PasswordStrength::of(&input.password) < PasswordStrength::Medium {
            return Err(AuthError::WeakPassword);
        }

        let encoded = self.hasher.hash(&input.password).map_err(|e| {
            error!(error = %e, "password hashing failed");
            AuthError::Internal
        })?;

        // The store's uniqueness constraint is authoritative: a duplicate
        // surfacing here lost the check/insert race and is still a
        // conflict, not an internal fault.
        let account = self
            .store
            .create(&input.email, &input.username, &encoded)
            .await
            .map_err(store_failure)?;

        info!(account_id = %account.id, "account registered");
        Ok(AccountInfo::from(account))
    }

    /// Authenticate and issue a session token.
    ///
    /// "No such account" and "wrong password" collapse into the same
    /// [`AuthError::InvalidCredentials`] value, so callers cannot probe for
    /// registered emails.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    /// use service::auth::domain::{LoginInput, RegisterInput};
    /// use service::auth::store::memory::MemoryStore;
    /// use service::auth::AuthService;
    /// use service::password::PasswordHasher;
    /// use service::token::TokenService;
    ///
    /// let svc = AuthService::new(
    ///     Arc::new(MemoryStore::default()),
    ///     PasswordHasher::default(),
    ///     TokenService::new("doc-secret").unwrap(),
    ///     Duration::from_secs(3600),
    /// );
    /// tokio_test::block_on(svc.register(RegisterInput {
    ///     email: "u@e.com".into(),
    ///     username: "u".into(),
    ///     password: "Passw0rd".into(),
    /// }))
    /// .unwrap();
    /// let session = tokio_test::block_on(svc.login(LoginInput {
    ///     email: "u@e.com".into(),
    ///     password: "Passw0rd".into(),
    /// }))
    /// .unwrap();
    /// assert_eq!(session.account.email, "u@e.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let account = self
            .store
            .find_by_email(&input.email)
            .await
            .map_err(store_failure)?
            .ok_or(AuthError::InvalidCredentials)?;

        match self.hasher.verify(&input.password, &account.password_hash) {
            Ok(true) => {}
            Ok(false) => return Err(AuthError::InvalidCredentials),
            Err(e) => {
                // A parse failure means the stored hash is corrupt. That is
                // our data problem; the caller sees a plain credential
                // rejection.
                error!(account_id = %account.id, error = %e, "stored password hash rejected");
                return Err(AuthError::InvalidCredentials);
            }
        }

        let token = self
            .tokens
            .issue(&account.id.to_string(), &account.username, self.token_ttl)
            .map_err(|e| {
                error!(account_id = %account.id, error = %e, "token issuance failed");
                AuthError::Internal
            })?;

        info!(account_id = %account.id, "login succeeded");
        Ok(AuthSession { account: AccountInfo::from(account), token })
    }
}

fn store_failure(err: StoreError) -> AuthError {
    match err {
        StoreError::Duplicate(field) => AuthError::Conflict(field),
        StoreError::Unavailable(detail) => {
            error!(error = %detail, "account store failure");
            AuthError::Internal
        }
    }
}
