use clap::Parser;
use clap::Subcommand;

/// Issue and check bearer tokens for configured accounts.
#[derive(Debug, Parser)]
#[command(name = "authctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and {RUN_MODE}.toml
    #[arg(long, env = "AUTHCTL_CONFIG_DIR", default_value = "config")]
    pub config_dir: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the stored digest for a password
    Hash {
        password: String,
    },

    /// Verify a username/password pair and print a signed token
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// Validate a token and evaluate authorization policies against it
    Validate {
        token: String,

        /// Policy to evaluate (repeatable)
        #[arg(long = "policy")]
        policies: Vec<String>,
    },
}
