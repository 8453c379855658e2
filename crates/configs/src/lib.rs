//! Typed configuration for the credential core.
//!
//! Loaded from a TOML file (`CONFIG_PATH`, default `config.toml`), overlaid
//! with environment variables, then validated. The signing secret lives in a
//! [`secrecy::SecretString`]: Debug output redacts it and no `Serialize`
//! impl exists, so it cannot leak through logs or dumps.

use anyhow::{anyhow, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub token: TokenConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize)]
pub struct TokenConfig {
    /// Symmetric signing secret. Empty is rejected by `validate`.
    #[serde(default)]
    pub secret: SecretString,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self { secret: SecretString::default(), ttl_secs: default_ttl_secs() }
    }
}

fn default_ttl_secs() -> u64 { 86_400 }

/// Argon2id cost knobs for newly created hashes. Historical hashes carry
/// their own parameters inside the encoded string, so raising these does not
/// invalidate stored credentials.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PasswordConfig {
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
    #[serde(default = "default_key_length")]
    pub key_length: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
            key_length: default_key_length(),
        }
    }
}

fn default_memory_kib() -> u32 { 64 * 1024 }
fn default_iterations() -> u32 { 1 }
fn default_parallelism() -> u32 { 4 }
fn default_key_length() -> u32 { 32 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if std::path::Path::new(&path).exists() {
        load_from_file(&path)
    } else {
        Ok(AppConfig::default())
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load, overlay environment variables, and validate. An empty signing
    /// secret fails here and must abort startup.
    pub fn load_and_validate() -> Result<Self> {
        dotenvy::dotenv().ok();
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.token.normalize_from_env();
        self.token.validate()?;
        self.password.validate()?;
        Ok(())
    }
}

impl TokenConfig {
    /// `AUTH_TOKEN_SECRET` and `AUTH_TOKEN_TTL_SECS` win over file values.
    pub fn normalize_from_env(&mut self) {
        if let Ok(secret) = std::env::var("AUTH_TOKEN_SECRET") {
            if !secret.is_empty() {
                self.secret = SecretString::from(secret);
            }
        }
        if let Ok(ttl) = std::env::var("AUTH_TOKEN_TTL_SECS") {
            if let Ok(ttl) = ttl.parse() {
                self.ttl_secs = ttl;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.secret.expose_secret().is_empty() {
            return Err(anyhow!(
                "token signing secret is empty: set AUTH_TOKEN_SECRET or [token].secret"
            ));
        }
        if self.ttl_secs == 0 {
            return Err(anyhow!("token ttl_secs must be positive"));
        }
        Ok(())
    }
}

impl PasswordConfig {
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(anyhow!("password iterations must be at least 1"));
        }
        if self.parallelism == 0 {
            return Err(anyhow!("password parallelism must be at least 1"));
        }
        // Argon2 requires at least 8 KiB of memory per lane.
        if self.memory_kib < 8 * self.parallelism {
            return Err(anyhow!(
                "password memory_kib must be at least 8x parallelism (got {} for p={})",
                self.memory_kib,
                self.parallelism
            ));
        }
        if self.key_length < 16 {
            return Err(anyhow!("password key_length must be at least 16 bytes"));
        }
        Ok(())
    }
}
