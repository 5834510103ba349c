use serde::ser::SerializeMap;
use serde::Serialize;
use serde::Serializer;

use crate::claims::registered;
use crate::claims::ClaimSet;

/// Wire form of a token body.
///
/// Registered claims come first, followed by the identity's claims as string
/// entries; a repeated claim type is written as a repeated key.
pub(crate) struct TokenPayload<'a> {
    pub issuer: &'a str,
    pub audience: &'a str,
    pub subject: &'a str,
    pub issued_at: i64,
    pub not_before: i64,
    pub expires_at: i64,
    pub token_id: &'a str,
    pub claims: &'a ClaimSet,
}

impl Serialize for TokenPayload<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(registered::ALL.len() + self.claims.len()))?;
        map.serialize_entry(registered::ISSUER, self.issuer)?;
        map.serialize_entry(registered::AUDIENCE, self.audience)?;
        map.serialize_entry(registered::SUBJECT, self.subject)?;
        map.serialize_entry(registered::ISSUED_AT, &self.issued_at)?;
        map.serialize_entry(registered::NOT_BEFORE, &self.not_before)?;
        map.serialize_entry(registered::EXPIRES_AT, &self.expires_at)?;
        map.serialize_entry(registered::TOKEN_ID, self.token_id)?;
        for claim in self.claims {
            map.serialize_entry(&claim.claim_type, &claim.value)?;
        }
        map.end()
    }
}

/// Read a NumericDate claim that was flattened into its textual form.
///
/// # Returns
/// * `Ok(None)` - Claim absent
/// * `Err(())` - Claim present but not a number
pub(crate) fn numeric_date(claims: &ClaimSet, name: &str) -> Result<Option<i64>, ()> {
    let Some(raw) = claims.find_first(name) else {
        return Ok(None);
    };

    if let Ok(seconds) = raw.parse::<i64>() {
        return Ok(Some(seconds));
    }

    match raw.parse::<f64>() {
        Ok(seconds) if seconds.is_finite() => Ok(Some(seconds.trunc() as i64)),
        _ => Err(()),
    }
}
