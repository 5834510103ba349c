use std::collections::HashMap;

use crate::claims::ClaimSet;
use crate::errors::ConfigurationError;

/// Named rule requiring one exact claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    name: String,
    claim_type: String,
    claim_value: String,
}

impl Policy {
    /// Require a claim with the given type and value.
    pub fn require_claim(
        name: impl Into<String>,
        claim_type: impl Into<String>,
        claim_value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            claim_type: claim_type.into(),
            claim_value: claim_value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn claim_type(&self) -> &str {
        &self.claim_type
    }

    pub fn claim_value(&self) -> &str {
        &self.claim_value
    }

    /// True if any claim matches the required type and value (case-sensitive).
    pub fn is_satisfied_by(&self, claims: &ClaimSet) -> bool {
        claims.contains(&self.claim_type, &self.claim_value)
    }
}

/// Policies defined at startup, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct PolicyRegistry {
    policies: HashMap<String, Policy>,
}

impl PolicyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a policy.
    ///
    /// # Errors
    /// * `DuplicatePolicy` - A policy with this name already exists
    /// * `InvalidPolicy` - The required claim type is empty
    pub fn register(&mut self, policy: Policy) -> Result<(), ConfigurationError> {
        if policy.claim_type.is_empty() {
            return Err(ConfigurationError::InvalidPolicy(policy.name));
        }
        if self.policies.contains_key(&policy.name) {
            return Err(ConfigurationError::DuplicatePolicy(policy.name));
        }
        self.policies.insert(policy.name.clone(), policy);
        Ok(())
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_policy(mut self, policy: Policy) -> Result<Self, ConfigurationError> {
        self.register(policy)?;
        Ok(self)
    }

    /// Resolve a policy reference during startup.
    ///
    /// # Errors
    /// * `UnknownPolicy` - No policy with this name is registered
    pub fn resolve(&self, name: &str) -> Result<&Policy, ConfigurationError> {
        self.policies
            .get(name)
            .ok_or_else(|| ConfigurationError::UnknownPolicy(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Policy> {
        self.policies.get(name)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Registered policy names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.policies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Answers whether a claim set satisfies a named policy.
///
/// Denial is an ordinary outcome, never an error.
#[derive(Debug, Clone, Default)]
pub struct PolicyEvaluator {
    registry: PolicyRegistry,
}

impl PolicyEvaluator {
    pub fn new(registry: PolicyRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    /// Check the claims against a named policy.
    ///
    /// Policy names should be resolved with [`PolicyRegistry::resolve`] at
    /// startup; an unregistered name reaching this point is denied.
    pub fn satisfies(&self, claims: &ClaimSet, policy_name: &str) -> bool {
        match self.registry.get(policy_name) {
            Some(policy) => {
                let allowed = policy.is_satisfied_by(claims);
                tracing::debug!(policy = policy_name, allowed, "Policy evaluated");
                allowed
            }
            None => {
                tracing::error!(policy = policy_name, "Unknown authorization policy");
                false
            }
        }
    }
}
