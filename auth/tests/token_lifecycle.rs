use std::collections::HashMap;

use auth::AuthFailure;
use auth::Authenticator;
use auth::ClaimSet;
use auth::Credential;
use auth::CredentialLookup;
use auth::PepperedSha256Hasher;
use auth::Policy;
use auth::PolicyEvaluator;
use auth::PolicyRegistry;
use auth::SigningKey;
use auth::TokenIssuer;
use auth::TokenOptions;
use auth::TokenValidator;
use auth::ValidationFailure;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;

struct Accounts(HashMap<String, Credential>);

impl CredentialLookup for Accounts {
    fn get_by_username(&self, username: &str) -> Option<Credential> {
        self.0.get(username).cloned()
    }
}

fn accounts() -> Accounts {
    let hasher = PepperedSha256Hasher::new();
    let alice = Credential::provision("alice", "secret", &hasher).unwrap();
    let carol = Credential::provision("carol", "hunter2", &hasher)
        .unwrap()
        .with_claim("NomeAplicacao", "User")
        .with_claim("NomeAplicacao", "Admin");

    Accounts(HashMap::from([
        ("alice".to_string(), alice),
        ("carol".to_string(), carol),
    ]))
}

fn options() -> TokenOptions {
    TokenOptions::new("c1f51f42", "c6bbbb645024")
        .with_signing_key(SigningKey::from_secret("c1f51f42-5727-4d15-b787-c6bbbb645024").unwrap())
        .with_valid_for(Duration::hours(2))
}

#[test]
fn test_login_issue_validate_scenario() {
    let authenticator = Authenticator::new(accounts());
    let issuer = TokenIssuer::new(&options()).unwrap();
    let validator = TokenValidator::new(&options()).unwrap();
    let iat = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();

    let claims = authenticator.verify("alice", "secret").expect("Login failed");
    assert_eq!(claims, ClaimSet::new().with("username", "alice"));

    let issued = issuer.issue_at(&claims, "alice", iat).unwrap();
    assert_eq!(issued.expires_at - issued.issued_at, 7200);

    let presented = validator
        .validate_at(&issued.token, iat + Duration::hours(1))
        .expect("Token rejected");
    assert!(presented.contains_all(&claims));
    assert_eq!(presented.subject(), Some("alice"));
    assert_eq!(presented.token_id(), Some(issued.jti.as_str()));

    assert_eq!(
        validator.validate_at(&issued.token, iat + Duration::hours(3)),
        Err(ValidationFailure::Expired)
    );
}

#[test]
fn test_roles_survive_round_trip_and_drive_policies() {
    let authenticator = Authenticator::new(accounts());
    let issuer = TokenIssuer::new(&options()).unwrap();
    let validator = TokenValidator::new(&options()).unwrap();
    let policies = PolicyEvaluator::new(
        PolicyRegistry::new()
            .with_policy(Policy::require_claim("User", "NomeAplicacao", "User"))
            .and_then(|r| r.with_policy(Policy::require_claim("Admin", "NomeAplicacao", "Admin")))
            .unwrap(),
    );

    let claims = authenticator.verify("carol", "hunter2").unwrap();
    let issued = issuer.issue(&claims, "carol").unwrap();
    let presented = validator.validate(&issued.token).unwrap();

    assert_eq!(
        presented.values("NomeAplicacao").collect::<Vec<_>>(),
        vec!["User", "Admin"]
    );
    assert!(policies.satisfies(&presented, "User"));
    assert!(policies.satisfies(&presented, "Admin"));
}

#[test]
fn test_failed_logins_look_alike() {
    let authenticator = Authenticator::new(accounts());

    let unknown = authenticator.verify("mallory", "secret").unwrap_err();
    let wrong = authenticator.verify("alice", "Secret").unwrap_err();

    assert_eq!(unknown, AuthFailure::UnknownUser);
    assert_eq!(wrong, AuthFailure::BadCredentials);
    assert_eq!(unknown.to_string(), wrong.to_string());
}
