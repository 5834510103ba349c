use authctl::config::Config;
use authctl::inbound::execute;
use authctl::inbound::Cli;
use authctl::App;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<(), anyhow::Error> {
    // Logs go to stderr; stdout carries command output only.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "authctl=info,auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    tracing::debug!(
        service = "authctl",
        version = env!("CARGO_PKG_VERSION"),
        config_dir = %cli.config_dir,
        "Starting"
    );

    let config = Config::load_from(&cli.config_dir)?;
    let app = App::from_config(&config)?;

    match execute(&app, &cli.command) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
