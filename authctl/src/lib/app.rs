use std::sync::Arc;

use auth::Argon2Hasher;
use auth::Authenticator;
use auth::ConfigurationError;
use auth::PasswordHasher;
use auth::PepperedSha256Hasher;
use auth::PolicyEvaluator;
use auth::TokenIssuer;
use auth::TokenValidator;

use crate::config::build_policy_registry;
use crate::config::Config;
use crate::config::PasswordConfig;
use crate::config::PasswordScheme;
use crate::outbound::repositories::InMemoryCredentialRepository;

pub type AppAuthenticator =
    Authenticator<Arc<InMemoryCredentialRepository>, Arc<dyn PasswordHasher>>;

/// Authentication components wired from configuration.
///
/// Everything here is read-only after startup and can be shared freely.
pub struct App {
    pub authenticator: AppAuthenticator,
    pub issuer: TokenIssuer,
    pub validator: TokenValidator,
    pub policies: PolicyEvaluator,
}

impl App {
    /// Build and check every component.
    ///
    /// # Errors
    /// * `ConfigurationError` - Any invalid token option or policy definition
    pub fn from_config(config: &Config) -> Result<Self, ConfigurationError> {
        let options = config.token.to_options()?;
        let issuer = TokenIssuer::new(&options)?;
        let validator = TokenValidator::new(&options)?;
        let policies = PolicyEvaluator::new(build_policy_registry(&config.policies)?);

        let repository = Arc::new(InMemoryCredentialRepository::from_config(
            &config.credentials,
        ));
        tracing::info!(
            issuer = %config.token.issuer,
            audience = %config.token.audience,
            valid_for_seconds = config.token.valid_for_seconds,
            clock_skew_seconds = config.token.clock_skew_seconds,
            policies = policies.registry().len(),
            credentials = repository.len(),
            "Authentication components ready"
        );

        Ok(Self {
            authenticator: Authenticator::with_hasher(
                repository,
                password_hasher(&config.password),
            ),
            issuer,
            validator,
            policies,
        })
    }
}

fn password_hasher(config: &PasswordConfig) -> Arc<dyn PasswordHasher> {
    match config.scheme {
        PasswordScheme::PepperedSha256 => match &config.pepper {
            Some(pepper) => Arc::new(PepperedSha256Hasher::with_pepper(pepper)),
            None => Arc::new(PepperedSha256Hasher::new()),
        },
        PasswordScheme::Argon2 => Arc::new(Argon2Hasher::new()),
    }
}
