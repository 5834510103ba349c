use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored digest is not in a format the hasher understands.
    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
