pub mod cli;
pub mod commands;

pub use cli::Cli;
pub use cli::Command;
pub use commands::execute;
pub use commands::execute_at;
pub use commands::CommandError;
