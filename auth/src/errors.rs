use thiserror::Error;

/// Invalid startup options.
///
/// Raised while constructing issuers, validators and policy registries; never
/// produced while serving a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Token validity window must be at least one second")]
    InvalidValidityWindow,

    #[error("Signing key is not configured")]
    MissingSigningKey,

    #[error("Signing key must not be empty")]
    EmptySigningKey,

    #[error("Token id generator is not configured")]
    MissingIdGenerator,

    #[error("Clock skew must not be negative")]
    NegativeClockSkew,

    #[error("Unknown authorization policy: {0}")]
    UnknownPolicy(String),

    #[error("Authorization policy registered twice: {0}")]
    DuplicatePolicy(String),

    #[error("Authorization policy {0} has an empty claim type")]
    InvalidPolicy(String),
}
