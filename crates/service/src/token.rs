//! Signed session tokens: HS256-signed claims with expiry enforcement.
//!
//! A token is the only session record; validity is decided entirely by the
//! signature and the clock at verification time.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by every issued token; reconstructed, never mutated, at
/// verification time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Opaque account identifier.
    #[serde(rename = "sub")]
    pub subject_id: String,
    pub username: String,
    #[serde(rename = "iat")]
    pub issued_at: i64,
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Construction-time configuration error; fatal at startup.
    #[error("token signing secret must not be empty")]
    MissingSecret,
    /// The signature does not cover the presented payload. Deliberately
    /// silent about which part failed.
    #[error("token signature is invalid")]
    Signature,
    /// The signature is valid but `exp` has passed.
    #[error("token has expired")]
    Expired,
    #[error("token signing failed: {0}")]
    Signing(String),
}

pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Build a service around a shared symmetric secret. The secret is held
    /// only as derived key material and is never logged or serialized.
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }
        let mut validation = Validation::new(Algorithm::HS256);
        // No clock-skew window: a token is expired the moment `exp` passes.
        validation.leeway = 0;
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Issue a signed token binding `subject_id` and `username` for `ttl`.
    pub fn issue(
        &self,
        subject_id: &str,
        username: &str,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            subject_id: subject_id.to_string(),
            username: username.to_string(),
            issued_at: now,
            expires_at: now + ttl.as_secs() as i64,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature and expiry, recovering the claims.
    ///
    /// Expiry is reported separately from signature failure so callers can
    /// route expired sessions to a re-login flow instead of treating them as
    /// tampering. A valid token with a future `iat` is accepted as-is.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(TokenError::Expired),
                _ => Err(TokenError::Signature),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    fn service() -> TokenService {
        TokenService::new(SECRET).unwrap()
    }

    #[test]
    fn empty_secret_rejected_at_construction() {
        assert_eq!(TokenService::new("").unwrap_err(), TokenError::MissingSecret);
    }

    #[test]
    fn issue_then_verify_recovers_claims() {
        let svc = service();
        let token = svc
            .issue("account-1", "alice", Duration::from_secs(3600))
            .unwrap();
        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.subject_id, "account-1");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.expires_at - claims.issued_at, 3600);
    }

    #[test]
    fn tampered_payload_fails_signature() {
        let svc = service();
        let token = svc
            .issue("account-1", "alice", Duration::from_secs(3600))
            .unwrap();
        // Flip one character inside the payload segment.
        let payload_start = token.find('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        bytes[payload_start] = if bytes[payload_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();
        assert_eq!(svc.verify(&tampered).unwrap_err(), TokenError::Signature);
    }

    #[test]
    fn wrong_key_fails_signature() {
        let token = service()
            .issue("account-1", "alice", Duration::from_secs(3600))
            .unwrap();
        let other = TokenService::new("a-different-secret").unwrap();
        assert_eq!(other.verify(&token).unwrap_err(), TokenError::Signature);
    }

    #[test]
    fn zero_ttl_token_expires_immediately() {
        let svc = service();
        let token = svc
            .issue("account-1", "alice", Duration::from_secs(0))
            .unwrap();
        // `exp` holds through its own second; step past the boundary.
        std::thread::sleep(Duration::from_millis(1100));
        assert_eq!(svc.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn future_issued_at_is_accepted() {
        let svc = service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            subject_id: "account-1".into(),
            username: "alice".into(),
            issued_at: now + 3600,
            expires_at: now + 7200,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert_eq!(svc.verify(&token).unwrap().issued_at, now + 3600);
    }

    #[test]
    fn garbage_token_fails_signature() {
        assert_eq!(
            service().verify("not-a-token").unwrap_err(),
            TokenError::Signature
        );
    }
}
