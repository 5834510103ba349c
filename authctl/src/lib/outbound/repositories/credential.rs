use std::collections::HashMap;

use auth::Credential;
use auth::CredentialLookup;

use crate::config::CredentialConfig;

/// Credential store held in memory, keyed by exact username.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialRepository {
    credentials: HashMap<String, Credential>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the store from configured accounts.
    ///
    /// A username listed twice keeps its last entry.
    pub fn from_config(entries: &[CredentialConfig]) -> Self {
        let mut repository = Self::new();

        for entry in entries {
            let mut credential = entry
                .claims
                .iter()
                .fold(
                    Credential::new(&entry.username, &entry.password_digest),
                    |credential, claim| credential.with_claim(&claim.claim_type, &claim.value),
                );
            if !entry.active {
                credential.deactivate();
            }

            if repository.insert(credential).is_some() {
                tracing::warn!(username = %entry.username, "Duplicate credential entry replaced");
            }
        }

        repository
    }

    /// Add or replace a credential.
    ///
    /// # Returns
    /// The credential previously stored under the same username
    pub fn insert(&mut self, credential: Credential) -> Option<Credential> {
        self.credentials
            .insert(credential.username().to_string(), credential)
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

impl CredentialLookup for InMemoryCredentialRepository {
    fn get_by_username(&self, username: &str) -> Option<Credential> {
        self.credentials.get(username).cloned()
    }
}
