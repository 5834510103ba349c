pub mod credential;

pub use credential::InMemoryCredentialRepository;
