use std::sync::Arc;

use crate::claims::Claim;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Stored login credential.
///
/// Created when an account is provisioned; only the active flag changes
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    username: String,
    password_digest: String,
    active: bool,
    claims: Vec<Claim>,
}

impl Credential {
    /// Build an active credential from an already hashed password.
    ///
    /// # Arguments
    /// * `username` - Unique, case-sensitive login name
    /// * `password_digest` - Digest produced by the configured [`PasswordHasher`]
    pub fn new(username: impl Into<String>, password_digest: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_digest: password_digest.into(),
            active: true,
            claims: Vec::new(),
        }
    }

    /// Provision a credential by hashing a plaintext password.
    ///
    /// # Errors
    /// * `HashingFailed` - The hasher rejected the password
    pub fn provision<H: PasswordHasher + ?Sized>(
        username: impl Into<String>,
        password: &str,
        hasher: &H,
    ) -> Result<Self, PasswordError> {
        Ok(Self::new(username, hasher.hash(password)?))
    }

    /// Attach an authorization claim granted to this account.
    pub fn with_claim(mut self, claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        self.claims.push(Claim::new(claim_type, value));
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_digest(&self) -> &str {
        &self.password_digest
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Authorization claims granted to this account.
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Read access to the external credential store.
///
/// The store owns its own consistency; implementations only need to be safe to
/// call from many threads at once.
pub trait CredentialLookup: Send + Sync {
    /// Find a credential by its exact username.
    fn get_by_username(&self, username: &str) -> Option<Credential>;

    /// Find a credential by the store's generic identifier.
    ///
    /// Defaults to the username lookup for stores keyed by username.
    fn get(&self, id: &str) -> Option<Credential> {
        self.get_by_username(id)
    }
}

impl<L: CredentialLookup + ?Sized> CredentialLookup for Arc<L> {
    fn get_by_username(&self, username: &str) -> Option<Credential> {
        (**self).get_by_username(username)
    }

    fn get(&self, id: &str) -> Option<Credential> {
        (**self).get(id)
    }
}
