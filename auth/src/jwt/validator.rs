use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::errors::ValidationFailure;
use super::options::TokenOptions;
use super::payload::numeric_date;
use crate::claims::registered;
use crate::claims::ClaimSet;
use crate::errors::ConfigurationError;

/// Verifies presented tokens and reconstructs their claims.
///
/// Checks, in order: structure, HS256 signature, issuer, audience, not-before
/// and expiry (both widened by the configured clock skew).
pub struct TokenValidator {
    issuer: String,
    audience: String,
    decoding_key: DecodingKey,
    validation: Validation,
    clock_skew: i64,
}

impl TokenValidator {
    /// Create a validator from startup options.
    ///
    /// # Errors
    /// * `MissingSigningKey` - No signing key configured
    /// * `NegativeClockSkew` - Clock skew is below zero
    pub fn new(options: &TokenOptions) -> Result<Self, ConfigurationError> {
        let signing_key = options
            .signing_key
            .as_ref()
            .ok_or(ConfigurationError::MissingSigningKey)?;
        if options.clock_skew < chrono::Duration::zero() {
            return Err(ConfigurationError::NegativeClockSkew);
        }

        // Only the signature is checked by jsonwebtoken; the registered claims
        // are checked below against an explicit clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Ok(Self {
            issuer: options.issuer.clone(),
            audience: options.audience.clone(),
            decoding_key: signing_key.decoding_key(),
            validation,
            clock_skew: options.clock_skew.num_seconds(),
        })
    }

    /// Validate a token against the system clock.
    pub fn validate(&self, token: &str) -> Result<ClaimSet, ValidationFailure> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as of the given instant.
    ///
    /// # Returns
    /// Every claim in the payload, registered claims included, in wire order
    ///
    /// # Errors
    /// * `Malformed` - Not three segments, undecodable, or no numeric `exp`
    /// * `BadSignature` - Signature mismatch or a non-HS256 header
    /// * `WrongIssuer` / `WrongAudience` - `iss` / `aud` not the configured value
    /// * `NotYetValid` - `now` is before `nbf - skew`
    /// * `Expired` - `now` is after `exp + skew`
    pub fn validate_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<ClaimSet, ValidationFailure> {
        let result = self.check(token, now.timestamp());

        match &result {
            Ok(claims) => tracing::debug!(
                subject = claims.subject().unwrap_or_default(),
                jti = claims.token_id().unwrap_or_default(),
                "Token accepted"
            ),
            Err(failure) => tracing::debug!(reason = failure.code(), "Token rejected"),
        }

        result
    }

    fn check(&self, token: &str, now: i64) -> Result<ClaimSet, ValidationFailure> {
        inspect_segments(token)?;

        let claims = jsonwebtoken::decode::<ClaimSet>(token, &self.decoding_key, &self.validation)
            .map_err(classify)?
            .claims;

        let expires_at = numeric_date(&claims, registered::EXPIRES_AT)
            .ok()
            .flatten()
            .ok_or(ValidationFailure::Malformed)?;
        let not_before = numeric_date(&claims, registered::NOT_BEFORE)
            .map_err(|_| ValidationFailure::Malformed)?;

        if claims.find_first(registered::ISSUER) != Some(self.issuer.as_str()) {
            return Err(ValidationFailure::WrongIssuer);
        }

        if !claims
            .values(registered::AUDIENCE)
            .any(|audience| audience == self.audience)
        {
            return Err(ValidationFailure::WrongAudience);
        }

        if let Some(not_before) = not_before {
            if now < not_before.saturating_sub(self.clock_skew) {
                return Err(ValidationFailure::NotYetValid);
            }
        }

        if now > expires_at.saturating_add(self.clock_skew) {
            return Err(ValidationFailure::Expired);
        }

        Ok(claims)
    }
}

/// Decode the compact form far enough to tell a malformed token from a
/// forged one before any signature work.
///
/// The payload is only base64-checked here; its JSON is read after the
/// signature matches, so a tampered payload stays a signature failure.
fn inspect_segments(token: &str) -> Result<(), ValidationFailure> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header, payload, signature] = segments.as_slice() else {
        return Err(ValidationFailure::Malformed);
    };

    let decode = |segment: &str| {
        if segment.is_empty() {
            return Err(ValidationFailure::Malformed);
        }
        URL_SAFE_NO_PAD
            .decode(segment)
            .map_err(|_| ValidationFailure::Malformed)
    };
    let header = decode(*header)?;
    decode(*payload)?;
    decode(*signature)?;

    let header: serde_json::Value =
        serde_json::from_slice(&header).map_err(|_| ValidationFailure::Malformed)?;
    match header.get("alg").and_then(serde_json::Value::as_str) {
        Some("HS256") => Ok(()),
        Some(_) => Err(ValidationFailure::BadSignature),
        None => Err(ValidationFailure::Malformed),
    }
}

fn classify(error: jsonwebtoken::errors::Error) -> ValidationFailure {
    match error.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
            ValidationFailure::BadSignature
        }
        _ => ValidationFailure::Malformed,
    }
}
