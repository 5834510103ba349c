use std::collections::BTreeMap;

use auth::AuthFailure;
use auth::Claim;
use auth::ConfigurationError;
use auth::IssueError;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::ValidationFailure;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use super::cli::Command;
use crate::app::App;

/// Command failures as shown to the operator.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Deliberately carries no detail about why the login was refused.
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("Token rejected: {0}")]
    TokenRejected(#[from] ValidationFailure),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Token generation failed: {0}")]
    Issue(#[from] IssueError),

    #[error("Password hashing failed: {0}")]
    Password(#[from] PasswordError),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl From<AuthFailure> for CommandError {
    fn from(_: AuthFailure) -> Self {
        CommandError::AuthenticationFailed
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Validity window in seconds.
    pub expires: i64,
    pub user: UserData,
}

#[derive(Debug, Serialize)]
pub struct UserData {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse<'a> {
    pub claims: &'a [Claim],
    pub policies: BTreeMap<&'a str, bool>,
}

/// Run a command against the system clock.
pub fn execute(app: &App, command: &Command) -> Result<String, CommandError> {
    execute_at(app, command, Utc::now())
}

/// Run a command as of the given instant.
///
/// # Returns
/// Text to print on standard output
pub fn execute_at(
    app: &App,
    command: &Command,
    now: DateTime<Utc>,
) -> Result<String, CommandError> {
    match command {
        Command::Hash { password } => Ok(app.authenticator.hasher().hash(password)?),
        Command::Login { username, password } => login(app, username, password, now),
        Command::Validate { token, policies } => validate(app, token, policies, now),
    }
}

fn login(
    app: &App,
    username: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<String, CommandError> {
    let claims = app.authenticator.verify(username, password)?;
    let issued = app.issuer.issue_at(&claims, username, now)?;

    let response = LoginResponse {
        token: issued.token,
        expires: issued.expires_in,
        user: UserData {
            username: username.to_string(),
        },
    };

    Ok(serde_json::to_string_pretty(&response)?)
}

fn validate(
    app: &App,
    token: &str,
    policies: &[String],
    now: DateTime<Utc>,
) -> Result<String, CommandError> {
    // Policy references are configuration: resolve them before looking at the token.
    for name in policies {
        app.policies.registry().resolve(name)?;
    }

    let claims = app.validator.validate_at(token, now)?;

    let decisions = policies
        .iter()
        .map(|name| (name.as_str(), app.policies.satisfies(&claims, name)))
        .collect();

    let response = ValidateResponse {
        claims: claims.as_slice(),
        policies: decisions,
    };

    Ok(serde_json::to_string_pretty(&response)?)
}
