use auth::Claim;
use auth::PasswordHasher;
use auth::PepperedSha256Hasher;
use authctl::config::Config;
use authctl::config::CredentialConfig;
use authctl::config::PasswordConfig;
use authctl::config::PolicyConfig;
use authctl::config::TokenConfig;
use authctl::App;

pub const SIGNING_KEY: &str = "test_secret_key_at_least_32_bytes!";

/// Configuration equivalent to the development files, built in code.
pub fn test_config() -> Config {
    let hasher = PepperedSha256Hasher::new();

    Config {
        token: TokenConfig {
            issuer: "authctl".to_string(),
            audience: "authctl-clients".to_string(),
            signing_key: Some(SIGNING_KEY.to_string()),
            valid_for_seconds: 2 * 60 * 60,
            not_before_offset_seconds: 0,
            clock_skew_seconds: 0,
        },
        password: PasswordConfig::default(),
        policies: vec![policy("User"), policy("Admin")],
        credentials: vec![
            CredentialConfig {
                username: "alice".to_string(),
                password_digest: hasher.hash("secret").unwrap(),
                active: true,
                claims: vec![],
            },
            CredentialConfig {
                username: "carol".to_string(),
                password_digest: hasher.hash("carol-pass").unwrap(),
                active: true,
                claims: vec![
                    Claim::new("NomeAplicacao", "User"),
                    Claim::new("NomeAplicacao", "Admin"),
                ],
            },
            CredentialConfig {
                username: "dave".to_string(),
                password_digest: hasher.hash("dave-pass").unwrap(),
                active: true,
                claims: vec![Claim::new("NomeAplicacao", "User")],
            },
            CredentialConfig {
                username: "bob".to_string(),
                password_digest: hasher.hash("pass_word!").unwrap(),
                active: false,
                claims: vec![Claim::new("NomeAplicacao", "User")],
            },
        ],
    }
}

pub fn test_app() -> App {
    App::from_config(&test_config()).expect("Failed to build app")
}

fn policy(name: &str) -> PolicyConfig {
    PolicyConfig {
        name: name.to_string(),
        claim_type: "NomeAplicacao".to_string(),
        claim_value: name.to_string(),
    }
}
