//! Password hashing: Argon2id with a self-describing encoded format.
//!
//! Encoded form: `$argon2id$v=19$m=65536,t=1,p=4$<salt>$<digest>`, salt and
//! digest in unpadded standard base64. Verification reads the cost
//! parameters back out of the encoded string, so hashes created under older
//! settings keep verifying after a policy change.

use argon2::{Algorithm, Argon2, Params, Version};
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

/// Salt length in bytes for newly created hashes.
pub const SALT_LEN: usize = 16;

/// Argon2id cost knobs embedded in every encoded hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub key_length: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self { memory_kib: 64 * 1024, iterations: 1, parallelism: 4, key_length: 32 }
    }
}

impl From<&configs::PasswordConfig> for HashParams {
    fn from(cfg: &configs::PasswordConfig) -> Self {
        Self {
            memory_kib: cfg.memory_kib,
            iterations: cfg.iterations,
            parallelism: cfg.parallelism,
            key_length: cfg.key_length,
        }
    }
}

#[derive(Debug, Error)]
pub enum PasswordError {
    /// The stored hash is corrupt or not in the expected encoded form. A
    /// data-integrity problem on our side, not a wrong password: log it,
    /// never surface it to the end user.
    #[error("invalid hash format: {0}")]
    Format(&'static str),
    /// The OS entropy source failed while drawing a salt.
    #[error("entropy source failure: {0}")]
    Entropy(rand::Error),
    /// Argon2 rejected the configured parameters.
    #[error("hashing failed: {0}")]
    Hash(argon2::Error),
}

pub struct PasswordHasher {
    params: HashParams,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(HashParams::default())
    }
}

impl PasswordHasher {
    pub fn new(params: HashParams) -> Self {
        Self { params }
    }

    /// Hash a plaintext password under the configured parameters with a
    /// fresh random salt; two calls with the same input produce different
    /// encoded strings.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.try_fill_bytes(&mut salt).map_err(PasswordError::Entropy)?;
        let digest =
            derive(password.as_bytes(), &salt, self.params).map_err(PasswordError::Hash)?;
        Ok(format!(
            "$argon2id$v={}$m={},t={},p={}${}${}",
            Version::V0x13 as u32,
            self.params.memory_kib,
            self.params.iterations,
            self.params.parallelism,
            STANDARD_NO_PAD.encode(salt),
            STANDARD_NO_PAD.encode(&digest),
        ))
    }

    /// Verify a plaintext password against a previously encoded hash.
    ///
    /// Cost parameters and salt come from the encoded string, never from the
    /// hasher's own defaults. `Ok(false)` means the password does not match;
    /// `Err(Format)` means the stored value is corrupt.
    pub fn verify(&self, password: &str, encoded: &str) -> Result<bool, PasswordError> {
        let (params, salt, stored) = parse_encoded(encoded)?;
        let computed = derive(password.as_bytes(), &salt, params)
            .map_err(|_| PasswordError::Format("parameters or salt unusable"))?;
        Ok(constant_time_compare(&computed, &stored))
    }
}

fn parse_encoded(encoded: &str) -> Result<(HashParams, Vec<u8>, Vec<u8>), PasswordError> {
    let parts: Vec<&str> = encoded.split('$').collect();
    if parts.len() != 6 || !parts[0].is_empty() {
        return Err(PasswordError::Format("expected six '$'-delimited fields"));
    }
    if parts[1] != "argon2id" {
        return Err(PasswordError::Format("unknown algorithm tag"));
    }
    let version: u32 = parts[2]
        .strip_prefix("v=")
        .and_then(|v| v.parse().ok())
        .ok_or(PasswordError::Format("malformed version field"))?;
    if version != Version::V0x13 as u32 {
        return Err(PasswordError::Format("unsupported version"));
    }
    let (memory_kib, iterations, parallelism) = parse_cost_fields(parts[3])?;
    let salt = STANDARD_NO_PAD
        .decode(parts[4])
        .map_err(|_| PasswordError::Format("salt is not valid base64"))?;
    let digest = STANDARD_NO_PAD
        .decode(parts[5])
        .map_err(|_| PasswordError::Format("digest is not valid base64"))?;
    let params = HashParams {
        memory_kib,
        iterations,
        parallelism,
        key_length: digest.len() as u32,
    };
    Ok((params, salt, digest))
}

fn parse_cost_fields(field: &str) -> Result<(u32, u32, u32), PasswordError> {
    let mut memory = None;
    let mut time = None;
    let mut lanes = None;
    for kv in field.split(',') {
        let (key, value) = kv
            .split_once('=')
            .ok_or(PasswordError::Format("malformed cost field"))?;
        let value: u32 = value
            .parse()
            .map_err(|_| PasswordError::Format("malformed cost field"))?;
        match key {
            "m" => memory = Some(value),
            "t" => time = Some(value),
            "p" => lanes = Some(value),
            _ => return Err(PasswordError::Format("unknown cost parameter")),
        }
    }
    match (memory, time, lanes) {
        (Some(m), Some(t), Some(p)) => Ok((m, t, p)),
        _ => Err(PasswordError::Format("missing cost parameter")),
    }
}

fn derive(password: &[u8], salt: &[u8], p: HashParams) -> Result<Vec<u8>, argon2::Error> {
    let params = Params::new(
        p.memory_kib,
        p.iterations,
        p.parallelism,
        Some(p.key_length as usize),
    )?;
    let argon = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let mut out = vec![0u8; p.key_length as usize];
    argon.hash_password_into(password, salt, &mut out)?;
    Ok(out)
}

/// Constant-time digest comparison; a length mismatch answers without
/// touching content bytes.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
