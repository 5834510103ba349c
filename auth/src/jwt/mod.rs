pub mod errors;
pub mod issuer;
pub mod key;
pub mod options;
mod payload;
pub mod validator;

pub use errors::IssueError;
pub use errors::ValidationFailure;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use key::SigningKey;
pub use options::IdGenerator;
pub use options::TokenOptions;
pub use options::UuidGenerator;
pub use options::DEFAULT_VALID_FOR_SECONDS;
pub use validator::TokenValidator;
