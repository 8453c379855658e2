use std::fmt;

use thiserror::Error;

/// Which uniqueness constraint a registration collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    Email,
    Username,
}

impl fmt::Display for ConflictField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictField::Email => f.write_str("email"),
            ConflictField::Username => f.write_str("username"),
        }
    }
}

/// Business errors for credential workflows. Every variant is safe to show
/// to a caller; lower-level detail is logged at the mapping site and never
/// carried across this boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("{0} already in use")]
    Conflict(ConflictField),
    #[error("password too weak")]
    WeakPassword,
    /// Wrong email or wrong password; deliberately indistinguishable.
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("internal error")]
    Internal,
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict(_) => 1002,
            AuthError::WeakPassword => 1003,
            AuthError::InvalidCredentials => 1004,
            AuthError::Internal => 1500,
        }
    }
}
