use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::errors::IssueError;
use super::options::IdGenerator;
use super::options::TokenOptions;
use super::payload::TokenPayload;
use crate::claims::registered;
use crate::claims::ClaimSet;
use crate::errors::ConfigurationError;

/// A freshly signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact `header.payload.signature` form.
    pub token: String,
    /// Validity window in seconds.
    pub expires_in: i64,
    /// Unique token identifier (`jti`).
    pub jti: String,
    /// Unix timestamp of `iat`.
    pub issued_at: i64,
    /// Unix timestamp of `exp`.
    pub expires_at: i64,
}

/// Builds HS256-signed tokens from an identity's claims.
pub struct TokenIssuer {
    issuer: String,
    audience: String,
    encoding_key: EncodingKey,
    header: Header,
    valid_for: Duration,
    not_before_offset: Duration,
    id_generator: Arc<dyn IdGenerator>,
}

impl TokenIssuer {
    /// Create an issuer from startup options.
    ///
    /// # Errors
    /// * `InvalidValidityWindow` - `valid_for` is shorter than one second
    /// * `MissingSigningKey` - No signing key configured
    /// * `MissingIdGenerator` - No token id generator configured
    pub fn new(options: &TokenOptions) -> Result<Self, ConfigurationError> {
        if options.valid_for.num_seconds() <= 0 {
            return Err(ConfigurationError::InvalidValidityWindow);
        }
        let signing_key = options
            .signing_key
            .as_ref()
            .ok_or(ConfigurationError::MissingSigningKey)?;
        let id_generator = options
            .id_generator
            .clone()
            .ok_or(ConfigurationError::MissingIdGenerator)?;

        Ok(Self {
            issuer: options.issuer.clone(),
            audience: options.audience.clone(),
            encoding_key: signing_key.encoding_key(),
            header: Header::new(Algorithm::HS256),
            valid_for: options.valid_for,
            not_before_offset: options.not_before_offset,
            id_generator,
        })
    }

    pub fn valid_for(&self) -> Duration {
        self.valid_for
    }

    /// Issue a token valid from now.
    pub fn issue(&self, claims: &ClaimSet, subject: &str) -> Result<IssuedToken, IssueError> {
        self.issue_at(claims, subject, Utc::now())
    }

    /// Issue a token as of the given instant.
    ///
    /// # Arguments
    /// * `claims` - Identity claims to embed; registered names are not allowed
    /// * `subject` - Value of the `sub` claim
    /// * `now` - Issuance instant (`iat`)
    ///
    /// # Errors
    /// * `ReservedClaim` - A claim uses a registered claim name
    /// * `Encoding` - Serialization or signing failed
    pub fn issue_at(
        &self,
        claims: &ClaimSet,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, IssueError> {
        if let Some(claim) = claims
            .iter()
            .find(|claim| registered::is_registered(&claim.claim_type))
        {
            return Err(IssueError::ReservedClaim(claim.claim_type.clone()));
        }

        let issued_at = now.timestamp();
        let expires_in = self.valid_for.num_seconds();
        let expires_at = issued_at.saturating_add(expires_in);
        let not_before = issued_at.saturating_add(self.not_before_offset.num_seconds());
        let jti = self.id_generator.new_id();

        let payload = TokenPayload {
            issuer: &self.issuer,
            audience: &self.audience,
            subject,
            issued_at,
            not_before,
            expires_at,
            token_id: &jti,
            claims,
        };

        let token = jsonwebtoken::encode(&self.header, &payload, &self.encoding_key)
            .map_err(|e| IssueError::Encoding(e.to_string()))?;

        tracing::debug!(
            subject,
            jti = %jti,
            issued_at,
            expires_at,
            claims = claims.len(),
            "Token issued"
        );

        Ok(IssuedToken {
            token,
            expires_in,
            jti,
            issued_at,
            expires_at,
        })
    }
}
