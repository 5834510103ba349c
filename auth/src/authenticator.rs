use thiserror::Error;

use crate::claims::Claim;
use crate::claims::ClaimSet;
use crate::claims::USERNAME;
use crate::credential::Credential;
use crate::credential::CredentialLookup;
use crate::password::PasswordHasher;
use crate::password::PepperedSha256Hasher;

/// Reasons a login attempt is refused.
///
/// Every variant renders the same message so callers cannot tell an unknown
/// account from a wrong password. Use [`AuthFailure::reason`] for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("authentication failed")]
    UnknownUser,

    #[error("authentication failed")]
    Inactive,

    #[error("authentication failed")]
    BadCredentials,
}

impl AuthFailure {
    /// Internal sub-reason, for logging only.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthFailure::UnknownUser => "unknown_user",
            AuthFailure::Inactive => "inactive",
            AuthFailure::BadCredentials => "bad_credentials",
        }
    }
}

/// Which lookup of the credential store resolves the login name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupStrategy {
    #[default]
    ByUsername,
    ById,
}

/// Verifies username/password pairs against the credential store.
pub struct Authenticator<L, H = PepperedSha256Hasher> {
    lookup: L,
    hasher: H,
    strategy: LookupStrategy,
}

impl<L: CredentialLookup> Authenticator<L> {
    /// Create an authenticator using the peppered SHA-256 digest scheme.
    pub fn new(lookup: L) -> Self {
        Self::with_hasher(lookup, PepperedSha256Hasher::new())
    }
}

impl<L, H> Authenticator<L, H>
where
    L: CredentialLookup,
    H: PasswordHasher,
{
    /// Create an authenticator with a specific password hasher.
    ///
    /// # Arguments
    /// * `lookup` - Credential store access
    /// * `hasher` - Digest scheme the store was provisioned with
    pub fn with_hasher(lookup: L, hasher: H) -> Self {
        Self {
            lookup,
            hasher,
            strategy: LookupStrategy::default(),
        }
    }

    /// Choose which store lookup resolves the login name.
    pub fn with_strategy(mut self, strategy: LookupStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Verify credentials and return the identity's claims.
    ///
    /// # Arguments
    /// * `username` - Login name (case-sensitive)
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Claim set holding the username followed by the account's claims
    ///
    /// # Errors
    /// * `UnknownUser` - No credential for this name
    /// * `Inactive` - Account is deactivated
    /// * `BadCredentials` - Password does not match
    pub fn verify(&self, username: &str, password: &str) -> Result<ClaimSet, AuthFailure> {
        let lookup = &self.lookup;
        match self.strategy {
            LookupStrategy::ByUsername => verify_with(
                |name| lookup.get_by_username(name),
                &self.hasher,
                username,
                password,
            ),
            LookupStrategy::ById => {
                verify_with(|id| lookup.get(id), &self.hasher, username, password)
            }
        }
    }
}

/// Verify credentials using an arbitrary lookup function.
///
/// This is the single login routine behind [`Authenticator::verify`]; any
/// closure resolving a name to a [`Credential`] can drive it.
pub fn verify_with<F, H>(
    lookup: F,
    hasher: &H,
    username: &str,
    password: &str,
) -> Result<ClaimSet, AuthFailure>
where
    F: FnOnce(&str) -> Option<Credential>,
    H: PasswordHasher + ?Sized,
{
    let result = check_credential(lookup(username), hasher, username, password);

    match &result {
        Ok(_) => tracing::info!(username, "Authentication succeeded"),
        Err(failure) => {
            tracing::warn!(username, reason = failure.reason(), "Authentication failed")
        }
    }

    result
}

fn check_credential<H: PasswordHasher + ?Sized>(
    credential: Option<Credential>,
    hasher: &H,
    username: &str,
    password: &str,
) -> Result<ClaimSet, AuthFailure> {
    // Unknown and inactive accounts still pay for a hash.
    let credential = match credential {
        Some(credential) if credential.username() == username => credential,
        _ => {
            let _ = hasher.hash(password);
            return Err(AuthFailure::UnknownUser);
        }
    };

    if !credential.is_active() {
        let _ = hasher.hash(password);
        return Err(AuthFailure::Inactive);
    }

    match hasher.verify(password, credential.password_digest()) {
        Ok(true) => {}
        Ok(false) => return Err(AuthFailure::BadCredentials),
        Err(e) => {
            tracing::error!(username, error = %e, "Stored password digest could not be verified");
            return Err(AuthFailure::BadCredentials);
        }
    }

    let mut claims = vec![Claim::new(USERNAME, credential.username())];
    claims.extend(credential.claims().iter().cloned());
    Ok(ClaimSet::from(claims))
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::eq;

    use super::*;
    use crate::password::Argon2Hasher;

    mock! {
        pub TestCredentialLookup {}

        impl CredentialLookup for TestCredentialLookup {
            fn get_by_username(&self, username: &str) -> Option<Credential>;
            fn get(&self, id: &str) -> Option<Credential>;
        }
    }

    fn alice() -> Credential {
        Credential::provision("alice", "secret", &PepperedSha256Hasher::new())
            .expect("Failed to provision credential")
    }

    fn lookup_returning(credential: Option<Credential>) -> MockTestCredentialLookup {
        let mut lookup = MockTestCredentialLookup::new();
        lookup
            .expect_get_by_username()
            .times(1)
            .returning(move |_| credential.clone());
        lookup
    }

    #[test]
    fn test_verify_success() {
        let mut lookup = MockTestCredentialLookup::new();
        lookup
            .expect_get_by_username()
            .with(eq("alice"))
            .times(1)
            .returning(|_| Some(alice()));
        lookup.expect_get().times(0);

        let authenticator = Authenticator::new(lookup);
        let claims = authenticator.verify("alice", "secret").expect("Login failed");

        assert_eq!(claims, ClaimSet::new().with(USERNAME, "alice"));
    }

    #[test]
    fn test_verify_includes_account_claims() {
        let credential = alice()
            .with_claim("NomeAplicacao", "User")
            .with_claim("NomeAplicacao", "Admin");
        let authenticator = Authenticator::new(lookup_returning(Some(credential)));

        let claims = authenticator.verify("alice", "secret").unwrap();

        assert_eq!(
            claims,
            ClaimSet::new()
                .with(USERNAME, "alice")
                .with("NomeAplicacao", "User")
                .with("NomeAplicacao", "Admin")
        );
    }

    #[test]
    fn test_verify_unknown_user() {
        let authenticator = Authenticator::new(lookup_returning(None));
        assert_eq!(
            authenticator.verify("bob", "secret"),
            Err(AuthFailure::UnknownUser)
        );
    }

    #[test]
    fn test_verify_username_is_case_sensitive() {
        // A store that matches names loosely must not widen the login name.
        let authenticator = Authenticator::new(lookup_returning(Some(alice())));
        assert_eq!(
            authenticator.verify("Alice", "secret"),
            Err(AuthFailure::UnknownUser)
        );
    }

    #[test]
    fn test_verify_inactive() {
        let mut credential = alice();
        credential.deactivate();
        let authenticator = Authenticator::new(lookup_returning(Some(credential)));

        assert_eq!(
            authenticator.verify("alice", "secret"),
            Err(AuthFailure::Inactive)
        );
    }

    #[test]
    fn test_verify_bad_password() {
        let authenticator = Authenticator::new(lookup_returning(Some(alice())));
        assert_eq!(
            authenticator.verify("alice", "wrong"),
            Err(AuthFailure::BadCredentials)
        );
    }

    #[test]
    fn test_empty_password_against_non_empty_digest() {
        let authenticator = Authenticator::new(lookup_returning(Some(alice())));
        assert_eq!(
            authenticator.verify("alice", ""),
            Err(AuthFailure::BadCredentials)
        );
    }

    #[test]
    fn test_failures_are_indistinguishable() {
        let messages: Vec<String> = [
            AuthFailure::UnknownUser,
            AuthFailure::Inactive,
            AuthFailure::BadCredentials,
        ]
        .iter()
        .map(|failure| failure.to_string())
        .collect();

        assert!(messages.iter().all(|m| m == "authentication failed"));
        assert_ne!(AuthFailure::Inactive.reason(), AuthFailure::UnknownUser.reason());
    }

    #[test]
    fn test_by_id_strategy_uses_generic_lookup() {
        let mut lookup = MockTestCredentialLookup::new();
        lookup.expect_get_by_username().times(0);
        lookup
            .expect_get()
            .with(eq("alice"))
            .times(1)
            .returning(|_| Some(alice()));

        let authenticator = Authenticator::new(lookup).with_strategy(LookupStrategy::ById);

        assert!(authenticator.verify("alice", "secret").is_ok());
    }

    #[test]
    fn test_verify_with_closure() {
        let hasher = PepperedSha256Hasher::new();
        let result = verify_with(|_| Some(alice()), &hasher, "alice", "secret");
        assert_eq!(result.unwrap().username(), Some("alice"));
    }

    #[test]
    fn test_unreadable_digest_is_bad_credentials() {
        // Argon2 cannot parse a hex digest.
        let authenticator =
            Authenticator::with_hasher(lookup_returning(Some(alice())), Argon2Hasher::new());
        assert_eq!(
            authenticator.verify("alice", "secret"),
            Err(AuthFailure::BadCredentials)
        );
    }

    #[test]
    fn test_argon2_strategy() {
        let hasher = Argon2Hasher::new();
        let credential = Credential::provision("alice", "secret", &hasher).unwrap();
        let authenticator = Authenticator::with_hasher(lookup_returning(Some(credential)), hasher);

        assert!(authenticator.verify("alice", "secret").is_ok());
    }
}
