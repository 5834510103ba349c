use std::fmt;
use std::sync::Arc;

use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;

use crate::errors::ConfigurationError;

/// Shared HMAC secret used to sign and verify tokens.
///
/// Loaded once at startup and shared read-only by the issuer and the
/// validator. Both sides must hold the same bytes.
///
/// # Security Notes
/// - The secret should be at least 256 bits (32 bytes) for HS256
/// - Store secrets in environment variables or secure vaults, never in code
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Arc<[u8]>);

impl SigningKey {
    /// Wrap raw key bytes.
    ///
    /// # Errors
    /// * `EmptySigningKey` - No bytes were supplied
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Result<Self, ConfigurationError> {
        let bytes = bytes.as_ref();
        if bytes.is_empty() {
            return Err(ConfigurationError::EmptySigningKey);
        }
        Ok(Self(Arc::from(bytes)))
    }

    /// Use the bytes of a textual secret as the key.
    pub fn from_secret(secret: &str) -> Result<Self, ConfigurationError> {
        Self::from_bytes(secret.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(&self.0)
    }

    pub(crate) fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(&self.0)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKey([REDACTED; {} bytes])", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        assert_eq!(
            SigningKey::from_bytes(b""),
            Err(ConfigurationError::EmptySigningKey)
        );
        assert_eq!(
            SigningKey::from_secret(""),
            Err(ConfigurationError::EmptySigningKey)
        );
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = SigningKey::from_secret("super_secret_key_at_least_32_bytes!").unwrap();
        let printed = format!("{:?}", key);

        assert!(!printed.contains("super_secret"));
        assert!(printed.contains("35 bytes"));
    }
}
