use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Stored account row as the account store returns it. The encoded hash
/// stays inside the core; callers only ever see [`AccountInfo`].
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// Public projection of an account, safe to hand back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub id: Uuid,
    pub email: String,
    pub username: String,
}

impl From<Account> for AccountInfo {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            username: account.username,
        }
    }
}

/// Login result: the account's public fields plus a freshly issued token.
/// Transporting the token (cookie, header) is the caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub account: AccountInfo,
    pub token: String,
}
