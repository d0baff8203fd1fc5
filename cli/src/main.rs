//! Crest CLI - client for the Crest machine-learning platform.
//!
//! Handles browser-based login against a Crest cluster and keeps the
//! issued API key in the system keyring for the SDKs to pick up.

mod auth;
mod cli;
mod config;
mod error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{AuthCommands, Cli, Commands};
use crate::error::Result;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CREST_LOG")
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    // Run the command
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Setup {
            host,
            port,
            timeout,
            no_browser,
        } => cli::commands::handle_setup(host, port, timeout, no_browser).await,
        Commands::Auth { command } => match command {
            AuthCommands::Status => cli::commands::handle_status(),
            AuthCommands::Logout => cli::commands::handle_logout(),
        },
        Commands::Completions { shell } => cli::commands::handle_completions(shell),
    }
}
