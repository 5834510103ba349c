use std::fmt;

use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

/// Claim type carrying the authenticated username.
pub const USERNAME: &str = "username";

/// Registered JWT claim names (RFC 7519).
///
/// These are owned by the token issuer and cannot be supplied as custom claims.
pub mod registered {
    pub const ISSUER: &str = "iss";
    pub const AUDIENCE: &str = "aud";
    pub const SUBJECT: &str = "sub";
    pub const ISSUED_AT: &str = "iat";
    pub const NOT_BEFORE: &str = "nbf";
    pub const EXPIRES_AT: &str = "exp";
    pub const TOKEN_ID: &str = "jti";

    pub const ALL: [&str; 7] = [
        ISSUER, AUDIENCE, SUBJECT, ISSUED_AT, NOT_BEFORE, EXPIRES_AT, TOKEN_ID,
    ];

    /// Check whether a claim type is one of the registered names.
    pub fn is_registered(claim_type: &str) -> bool {
        ALL.contains(&claim_type)
    }
}

/// A single typed fact about an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    #[serde(rename = "type")]
    pub claim_type: String,
    pub value: String,
}

impl Claim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }

    /// Exact, case-sensitive match on both fields.
    pub fn matches(&self, claim_type: &str, value: &str) -> bool {
        self.claim_type == claim_type && self.value == value
    }
}

/// Ordered collection of claims attached to one authenticated identity.
///
/// Several claims may share a type (e.g. multiple roles). Once built the set
/// is only read; the `with` builder consumes and returns it.
///
/// Serializes as a flat JSON object. A type that occurs several times is
/// written as a repeated key; when deserializing, repeated keys and arrays
/// both expand into one claim per value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSet {
    claims: Vec<Claim>,
}

impl ClaimSet {
    /// Create an empty claim set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a claim.
    pub fn with(mut self, claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        self.claims.push(Claim::new(claim_type, value));
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Claim> {
        self.claims.iter()
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn as_slice(&self) -> &[Claim] {
        &self.claims
    }

    /// Value of the first claim with the given type.
    pub fn find_first(&self, claim_type: &str) -> Option<&str> {
        self.claims
            .iter()
            .find(|claim| claim.claim_type == claim_type)
            .map(|claim| claim.value.as_str())
    }

    /// All values recorded under a claim type, in order.
    pub fn values<'a>(&'a self, claim_type: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.claims
            .iter()
            .filter(move |claim| claim.claim_type == claim_type)
            .map(|claim| claim.value.as_str())
    }

    /// True if any claim matches both type and value exactly.
    pub fn contains(&self, claim_type: &str, value: &str) -> bool {
        self.claims.iter().any(|claim| claim.matches(claim_type, value))
    }

    /// True if every claim of `other` is present here.
    pub fn contains_all(&self, other: &ClaimSet) -> bool {
        other
            .iter()
            .all(|claim| self.contains(&claim.claim_type, &claim.value))
    }

    pub fn username(&self) -> Option<&str> {
        self.find_first(USERNAME)
    }

    pub fn subject(&self) -> Option<&str> {
        self.find_first(registered::SUBJECT)
    }

    pub fn token_id(&self) -> Option<&str> {
        self.find_first(registered::TOKEN_ID)
    }
}

impl From<Vec<Claim>> for ClaimSet {
    fn from(claims: Vec<Claim>) -> Self {
        Self { claims }
    }
}

impl FromIterator<Claim> for ClaimSet {
    fn from_iter<I: IntoIterator<Item = Claim>>(iter: I) -> Self {
        Self {
            claims: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ClaimSet {
    type Item = &'a Claim;
    type IntoIter = std::slice::Iter<'a, Claim>;

    fn into_iter(self) -> Self::IntoIter {
        self.claims.iter()
    }
}

impl IntoIterator for ClaimSet {
    type Item = Claim;
    type IntoIter = std::vec::IntoIter<Claim>;

    fn into_iter(self) -> Self::IntoIter {
        self.claims.into_iter()
    }
}

impl Serialize for ClaimSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.claims.len()))?;
        for claim in &self.claims {
            map.serialize_entry(&claim.claim_type, &claim.value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ClaimSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ClaimSetVisitor)
    }
}

struct ClaimSetVisitor;

impl<'de> Visitor<'de> for ClaimSetVisitor {
    type Value = ClaimSet;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of claim types to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut claims = Vec::new();
        while let Some((claim_type, value)) = map.next_entry::<String, serde_json::Value>()? {
            push_claim_values(&mut claims, &claim_type, value);
        }
        Ok(ClaimSet { claims })
    }
}

fn push_claim_values(claims: &mut Vec<Claim>, claim_type: &str, value: serde_json::Value) {
    use serde_json::Value;

    match value {
        Value::Null => {}
        Value::String(s) => claims.push(Claim::new(claim_type, s)),
        Value::Array(items) => {
            for item in items {
                push_claim_values(claims, claim_type, item);
            }
        }
        other => claims.push(Claim::new(claim_type, other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn roles() -> ClaimSet {
        ClaimSet::new()
            .with(USERNAME, "alice")
            .with("NomeAplicacao", "User")
            .with("NomeAplicacao", "Admin")
    }

    #[test]
    fn test_lookup_helpers() {
        let claims = roles();

        assert_eq!(claims.len(), 3);
        assert_eq!(claims.username(), Some("alice"));
        assert_eq!(claims.find_first("NomeAplicacao"), Some("User"));
        assert_eq!(
            claims.values("NomeAplicacao").collect::<Vec<_>>(),
            vec!["User", "Admin"]
        );
        assert!(claims.contains("NomeAplicacao", "Admin"));
        assert!(!claims.contains("NomeAplicacao", "admin"));
        assert!(claims.subject().is_none());
    }

    #[test]
    fn test_serialize_repeats_keys() {
        let encoded = serde_json::to_string(&roles()).unwrap();
        assert_eq!(
            encoded,
            r#"{"username":"alice","NomeAplicacao":"User","NomeAplicacao":"Admin"}"#
        );
    }

    #[test]
    fn test_deserialize_keeps_repeated_keys_in_order() {
        let decoded: ClaimSet = serde_json::from_str(
            r#"{"username":"alice","NomeAplicacao":"User","NomeAplicacao":"Admin"}"#,
        )
        .unwrap();
        assert_eq!(decoded, roles());
    }

    #[test]
    fn test_deserialize_flattens_arrays_and_scalars() {
        let decoded: ClaimSet = serde_json::from_value(json!({
            "role": ["User", "Admin"],
            "exp": 1700000000,
            "email_verified": true,
            "nickname": null
        }))
        .unwrap();

        assert_eq!(decoded.values("role").collect::<Vec<_>>(), vec!["User", "Admin"]);
        assert_eq!(decoded.find_first("exp"), Some("1700000000"));
        assert_eq!(decoded.find_first("email_verified"), Some("true"));
        assert!(decoded.find_first("nickname").is_none());
    }

    #[test]
    fn test_deserialize_rejects_non_object() {
        assert!(serde_json::from_str::<ClaimSet>("[1,2,3]").is_err());
    }

    #[test]
    fn test_registered_names() {
        assert!(registered::is_registered("exp"));
        assert!(registered::is_registered("jti"));
        assert!(!registered::is_registered(USERNAME));
    }
}
