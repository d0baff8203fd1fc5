//! Command-line argument parsing.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line client for the Crest machine-learning platform.
///
/// Crest manages projects, feature stores, and model serving; this client
/// handles logging in to a cluster through the browser and keeping the
/// issued API key in your system keyring.
#[derive(Parser, Debug)]
#[command(name = "crest")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in to a Crest cluster and store credentials.
    ///
    /// Opens the browser for login, waits for it to complete, then stores
    /// the issued API key in the system keyring and records the cluster in
    /// the config file.
    Setup {
        /// Cluster hostname (defaults to the configured host).
        #[arg(long)]
        host: Option<String>,

        /// Cluster port.
        #[arg(long)]
        port: Option<u16>,

        /// Overall time to wait for the browser login, in seconds.
        #[arg(long)]
        timeout: Option<u64>,

        /// Skip opening the browser automatically.
        #[arg(long)]
        no_browser: bool,
    },

    /// Inspect or remove stored credentials.
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },

    /// Generate shell completion scripts.
    ///
    /// Outputs completion script for the specified shell.
    /// Follow shell-specific instructions to install.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: ShellType,
    },
}

/// Authentication subcommands.
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Show current authentication status.
    Status,

    /// Remove stored credentials.
    Logout,
}

/// Supported shell types for the completions command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
}
