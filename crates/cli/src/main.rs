//! Domain Catcher - Watch domain names and register them the moment they become free
//!
//! Usage:
//!   domain-catcher                      - Authenticate, then scan forever
//!   domain-catcher run [--interval N]   - Same, with overrides
//!   domain-catcher check-credentials    - Verify the TransIP access token

use clap::{Parser, Subcommand};
use cli::commands::{CheckCredentialsCommand, RunCommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "domain-catcher")]
#[command(about = "Domain Catcher - Register watched domains as soon as they become available")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Monitor the watched domains and register free ones
    Run(RunCommand),
    /// Verify the configured access token against the API
    CheckCredentials(CheckCredentialsCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run(cmd)) => cmd.run().await,
        Some(Commands::CheckCredentials(cmd)) => cmd.run().await,
        None => RunCommand::default().run().await,
    }
}
