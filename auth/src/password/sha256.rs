use sha2::Digest;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::PasswordError;
use super::hasher::PasswordHasher;

/// Application-wide secret appended to every password before hashing.
pub const DEFAULT_PEPPER: &str = "|2d331cca-f6c0-40c0-bb43-6e32989c2881";

/// Deterministic password digest: lowercase hex SHA-256 of `password + pepper`.
///
/// # Security Notes
/// - There is no per-credential salt, so equal passwords produce equal digests
/// - SHA-256 is fast, which makes offline guessing cheap
/// - Kept for compatibility with existing credential stores; new deployments
///   should prefer [`Argon2Hasher`](super::Argon2Hasher)
#[derive(Debug, Clone)]
pub struct PepperedSha256Hasher {
    pepper: String,
}

impl PepperedSha256Hasher {
    /// Create a hasher using [`DEFAULT_PEPPER`].
    pub fn new() -> Self {
        Self::with_pepper(DEFAULT_PEPPER)
    }

    /// Create a hasher with a custom pepper.
    pub fn with_pepper(pepper: impl Into<String>) -> Self {
        Self {
            pepper: pepper.into(),
        }
    }

    /// Compute the digest of an optional password.
    ///
    /// A missing or empty password maps to the empty digest.
    ///
    /// # Arguments
    /// * `password` - Plaintext password, if any
    ///
    /// # Returns
    /// 64 character lowercase hex string, or `""` for an absent password
    pub fn digest(&self, password: Option<&str>) -> String {
        match password {
            None | Some("") => String::new(),
            Some(password) => {
                let mut hasher = Sha256::new();
                hasher.update(password.as_bytes());
                hasher.update(self.pepper.as_bytes());
                hex::encode(hasher.finalize())
            }
        }
    }
}

impl Default for PepperedSha256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for PepperedSha256Hasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        Ok(self.digest(Some(password)))
    }

    fn verify(&self, password: &str, stored: &str) -> Result<bool, PasswordError> {
        let candidate = self.digest(Some(password));
        Ok(candidate.as_bytes().ct_eq(stored.as_bytes()).into())
    }
}
