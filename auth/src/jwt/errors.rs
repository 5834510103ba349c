use thiserror::Error;

/// Why a presented token was rejected.
///
/// Checks run in declaration order; the first failing check wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token issuer is not accepted")]
    WrongIssuer,

    #[error("Token audience is not accepted")]
    WrongAudience,

    #[error("Token is not yet valid")]
    NotYetValid,

    #[error("Token is expired")]
    Expired,
}

impl ValidationFailure {
    /// Short machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationFailure::Malformed => "malformed",
            ValidationFailure::BadSignature => "bad_signature",
            ValidationFailure::WrongIssuer => "wrong_issuer",
            ValidationFailure::WrongAudience => "wrong_audience",
            ValidationFailure::NotYetValid => "not_yet_valid",
            ValidationFailure::Expired => "expired",
        }
    }
}

/// Error type for token issuance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueError {
    #[error("Claim {0} is reserved for the token issuer")]
    ReservedClaim(String),

    #[error("Failed to encode token: {0}")]
    Encoding(String),
}
