use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use super::key::SigningKey;

/// Default token lifetime: two days.
pub const DEFAULT_VALID_FOR_SECONDS: i64 = 2 * 24 * 60 * 60;

/// Source of unique token identifiers (`jti`).
pub trait IdGenerator: Send + Sync {
    fn new_id(&self) -> String;
}

/// Random 128-bit identifiers in canonical hyphenated UUID form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn new_id(&self) -> String {
        self()
    }
}

/// Startup options shared by [`TokenIssuer`](super::TokenIssuer) and
/// [`TokenValidator`](super::TokenValidator).
///
/// Nothing is checked here; the issuer and validator constructors reject
/// invalid combinations with a `ConfigurationError`.
#[derive(Clone)]
pub struct TokenOptions {
    /// Expected and emitted `iss`.
    pub issuer: String,
    /// Expected and emitted `aud`.
    pub audience: String,
    pub signing_key: Option<SigningKey>,
    /// Lifetime of issued tokens (`exp - iat`).
    pub valid_for: Duration,
    /// Offset of `nbf` from `iat`.
    pub not_before_offset: Duration,
    /// Tolerance applied to `nbf` and `exp` during validation.
    pub clock_skew: Duration,
    pub id_generator: Option<Arc<dyn IdGenerator>>,
}

impl TokenOptions {
    /// Create options with the default lifetime, no skew and UUID token ids.
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            signing_key: None,
            valid_for: Duration::seconds(DEFAULT_VALID_FOR_SECONDS),
            not_before_offset: Duration::zero(),
            clock_skew: Duration::zero(),
            id_generator: Some(Arc::new(UuidGenerator)),
        }
    }

    pub fn with_signing_key(mut self, signing_key: SigningKey) -> Self {
        self.signing_key = Some(signing_key);
        self
    }

    pub fn with_valid_for(mut self, valid_for: Duration) -> Self {
        self.valid_for = valid_for;
        self
    }

    pub fn with_not_before_offset(mut self, offset: Duration) -> Self {
        self.not_before_offset = offset;
        self
    }

    pub fn with_clock_skew(mut self, clock_skew: Duration) -> Self {
        self.clock_skew = clock_skew;
        self
    }

    pub fn with_id_generator(mut self, generator: impl IdGenerator + 'static) -> Self {
        self.id_generator = Some(Arc::new(generator));
        self
    }
}

impl fmt::Debug for TokenOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenOptions")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("signing_key", &self.signing_key)
            .field("valid_for", &self.valid_for)
            .field("not_before_offset", &self.not_before_offset)
            .field("clock_skew", &self.clock_skew)
            .field("id_generator", &self.id_generator.is_some())
            .finish()
    }
}
