use std::sync::Arc;
use std::time::Duration;

use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::errors::AuthError;
use service::auth::store::memory::MemoryStore;
use service::auth::AuthService;
use service::password::{HashParams, PasswordHasher};
use service::token::TokenService;

const SECRET: &str = "integration-secret";

fn build_service() -> AuthService<MemoryStore> {
    common::utils::logging::init_logging_default();
    AuthService::new(
        Arc::new(MemoryStore::default()),
        PasswordHasher::new(HashParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
            key_length: 32,
        }),
        TokenService::new(SECRET).unwrap(),
        Duration::from_secs(900),
    )
}

#[tokio::test]
async fn register_and_login_flow() {
    let svc = build_service();

    let account = svc
        .register(RegisterInput {
            email: "user@example.com".into(),
            username: "tester".into(),
            password: "S3curePass!".into(),
        })
        .await
        .unwrap();
    assert_eq!(account.email, "user@example.com");

    let session = svc
        .login(LoginInput {
            email: "user@example.com".into(),
            password: "S3curePass!".into(),
        })
        .await
        .unwrap();
    assert_eq!(session.account, account);

    // The token must verify under the same secret and carry the account.
    let claims = TokenService::new(SECRET).unwrap().verify(&session.token).unwrap();
    assert_eq!(claims.subject_id, account.id.to_string());
    assert_eq!(claims.username, "tester");
    assert_eq!(claims.expires_at - claims.issued_at, 900);
}

#[tokio::test]
async fn login_wrong_password_rejected() {
    let svc = build_service();

    svc.register(RegisterInput {
        email: "user@example.com".into(),
        username: "tester".into(),
        password: "StrongPass123".into(),
    })
    .await
    .unwrap();

    let err = svc
        .login(LoginInput {
            email: "user@example.com".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::InvalidCredentials);
}

#[tokio::test]
async fn register_weak_password_rejected() {
    let svc = build_service();

    let err = svc
        .register(RegisterInput {
            email: "a@b.com".into(),
            username: "a".into(),
            password: "short".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::WeakPassword);
}

#[tokio::test]
async fn from_config_builds_working_service() {
    let mut cfg = configs::parse(
        r#"
        [token]
        secret = "integration-secret"
        ttl_secs = 900

        [password]
        memory_kib = 1024
        parallelism = 1
        "#,
    )
    .unwrap();
    cfg.normalize_and_validate().unwrap();

    let svc = AuthService::from_config(Arc::new(MemoryStore::default()), &cfg).unwrap();
    svc.register(RegisterInput {
        email: "cfg@example.com".into(),
        username: "cfg".into(),
        password: "Passw0rd".into(),
    })
    .await
    .unwrap();
    let session = svc
        .login(LoginInput {
            email: "cfg@example.com".into(),
            password: "Passw0rd".into(),
        })
        .await
        .unwrap();
    assert!(!session.token.is_empty());
}
