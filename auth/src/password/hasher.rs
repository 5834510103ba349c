use super::errors::PasswordError;

/// Strategy for turning plaintext passwords into storable digests.
///
/// The authenticator only talks to this trait, so the digest scheme can be
/// swapped (e.g. from [`PepperedSha256Hasher`](super::PepperedSha256Hasher)
/// to [`Argon2Hasher`](super::Argon2Hasher)) without touching the login flow.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - The underlying algorithm rejected the input
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Check a plaintext password against a stored digest.
    ///
    /// Implementations must compare in constant time.
    ///
    /// # Errors
    /// * `VerificationFailed` - The stored digest cannot be interpreted
    fn verify(&self, password: &str, stored: &str) -> Result<bool, PasswordError>;
}

impl<H: PasswordHasher + ?Sized> PasswordHasher for std::sync::Arc<H> {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        (**self).hash(password)
    }

    fn verify(&self, password: &str, stored: &str) -> Result<bool, PasswordError> {
        (**self).verify(password, stored)
    }
}
