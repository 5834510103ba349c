use std::env;

use auth::Claim;
use auth::ConfigurationError;
use auth::Policy;
use auth::PolicyRegistry;
use auth::SigningKey;
use auth::TokenOptions;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub token: TokenConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub policies: Vec<PolicyConfig>,
    #[serde(default)]
    pub credentials: Vec<CredentialConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub issuer: String,
    pub audience: String,
    #[serde(default)]
    pub signing_key: Option<String>,
    #[serde(default = "default_valid_for_seconds")]
    pub valid_for_seconds: i64,
    #[serde(default)]
    pub not_before_offset_seconds: i64,
    #[serde(default)]
    pub clock_skew_seconds: i64,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PasswordScheme {
    #[default]
    PepperedSha256,
    Argon2,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PasswordConfig {
    #[serde(default)]
    pub scheme: PasswordScheme,
    /// Overrides the built-in pepper of the SHA-256 scheme.
    #[serde(default)]
    pub pepper: Option<String>,
}

/// Policy names are kept in a list: map keys would be lowercased by the loader.
#[derive(Debug, Deserialize, Clone)]
pub struct PolicyConfig {
    pub name: String,
    pub claim_type: String,
    pub claim_value: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CredentialConfig {
    pub username: String,
    pub password_digest: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub claims: Vec<Claim>,
}

fn default_valid_for_seconds() -> i64 {
    auth::jwt::DEFAULT_VALID_FOR_SECONDS
}

fn default_active() -> bool {
    true
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (AUTHCTL__TOKEN__SIGNING_KEY, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Same as [`Config::load`] with a custom configuration directory.
    pub fn load_from(directory: &str) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name(&format!("{}/default", directory)).required(false))
            .add_source(File::with_name(&format!("{}/{}", directory, run_mode)).required(false))
            // Example: AUTHCTL__TOKEN__SIGNING_KEY=... overrides token.signing_key
            .add_source(Environment::with_prefix("AUTHCTL").separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

impl TokenConfig {
    /// Translate into core token options.
    ///
    /// # Errors
    /// * `EmptySigningKey` - The configured key is an empty string
    pub fn to_options(&self) -> Result<TokenOptions, ConfigurationError> {
        let mut options = TokenOptions::new(&self.issuer, &self.audience)
            .with_valid_for(Duration::seconds(self.valid_for_seconds))
            .with_not_before_offset(Duration::seconds(self.not_before_offset_seconds))
            .with_clock_skew(Duration::seconds(self.clock_skew_seconds));

        if let Some(secret) = &self.signing_key {
            options = options.with_signing_key(SigningKey::from_secret(secret)?);
        }

        Ok(options)
    }
}

/// Register every configured policy.
///
/// # Errors
/// * `DuplicatePolicy` / `InvalidPolicy` - See [`PolicyRegistry::register`]
pub fn build_policy_registry(
    policies: &[PolicyConfig],
) -> Result<PolicyRegistry, ConfigurationError> {
    let mut registry = PolicyRegistry::new();
    for policy in policies {
        registry.register(Policy::require_claim(
            &policy.name,
            &policy.claim_type,
            &policy.claim_value,
        ))?;
    }
    Ok(registry)
}
