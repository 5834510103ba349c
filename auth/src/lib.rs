//! Credential authentication and bearer token library
//!
//! Provides the pieces a service needs to log users in and protect operations:
//! - Password digests behind a pluggable [`PasswordHasher`]
//! - Username/password verification producing a [`ClaimSet`]
//! - HS256 token issuance and validation (issuer, audience, signature, lifetime)
//! - Claim-based authorization policies
//!
//! HTTP handling, persistence and key management stay with the caller; the
//! credential store is reached through the [`CredentialLookup`] trait.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{PasswordHasher, PepperedSha256Hasher};
//!
//! let hasher = PepperedSha256Hasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &digest).unwrap());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use std::collections::HashMap;
//!
//! use auth::{
//!     Authenticator, Credential, CredentialLookup, PepperedSha256Hasher, Policy,
//!     PolicyEvaluator, PolicyRegistry, SigningKey, TokenIssuer, TokenOptions, TokenValidator,
//! };
//!
//! struct Store(HashMap<String, Credential>);
//!
//! impl CredentialLookup for Store {
//!     fn get_by_username(&self, username: &str) -> Option<Credential> {
//!         self.0.get(username).cloned()
//!     }
//! }
//!
//! let alice = Credential::provision("alice", "secret", &PepperedSha256Hasher::new())
//!     .unwrap()
//!     .with_claim("role", "Admin");
//! let store = Store(HashMap::from([("alice".to_string(), alice)]));
//!
//! // Startup: build and check configuration once
//! let options = TokenOptions::new("my-service", "my-clients")
//!     .with_signing_key(SigningKey::from_secret("secret_key_at_least_32_bytes_long!").unwrap());
//! let issuer = TokenIssuer::new(&options).unwrap();
//! let validator = TokenValidator::new(&options).unwrap();
//! let policies = PolicyEvaluator::new(
//!     PolicyRegistry::new()
//!         .with_policy(Policy::require_claim("Admin", "role", "Admin"))
//!         .unwrap(),
//! );
//!
//! // Login: verify and generate token
//! let authenticator = Authenticator::new(store);
//! let claims = authenticator.verify("alice", "secret").unwrap();
//! let issued = issuer.issue(&claims, "alice").unwrap();
//!
//! // Protected request: validate and authorize
//! let presented = validator.validate(&issued.token).unwrap();
//! assert!(policies.satisfies(&presented, "Admin"));
//! ```

pub mod authenticator;
pub mod claims;
pub mod credential;
pub mod errors;
pub mod jwt;
pub mod password;
pub mod policy;

// Re-export commonly used items
pub use authenticator::verify_with;
pub use authenticator::AuthFailure;
pub use authenticator::Authenticator;
pub use authenticator::LookupStrategy;
pub use claims::Claim;
pub use claims::ClaimSet;
pub use credential::Credential;
pub use credential::CredentialLookup;
pub use errors::ConfigurationError;
pub use jwt::IdGenerator;
pub use jwt::IssueError;
pub use jwt::IssuedToken;
pub use jwt::SigningKey;
pub use jwt::TokenIssuer;
pub use jwt::TokenOptions;
pub use jwt::TokenValidator;
pub use jwt::UuidGenerator;
pub use jwt::ValidationFailure;
pub use password::Argon2Hasher;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PepperedSha256Hasher;
pub use policy::Policy;
pub use policy::PolicyEvaluator;
pub use policy::PolicyRegistry;
