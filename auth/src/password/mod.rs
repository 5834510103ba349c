pub mod argon2;
pub mod errors;
pub mod hasher;
pub mod sha256;

pub use argon2::Argon2Hasher;
pub use errors::PasswordError;
pub use hasher::PasswordHasher;
pub use sha256::PepperedSha256Hasher;
pub use sha256::DEFAULT_PEPPER;
