//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Failover - resilient primary/fallback data sync
#[derive(Parser, Debug)]
#[command(name = "failover")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to failover.yaml config file
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the configured sync with retry and fallback
    Run(RunArgs),

    /// Validate the configuration
    Validate(ValidateArgs),
}

// Run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Disable backoff jitter (deterministic delays)
    #[arg(long)]
    pub no_jitter: bool,
}

// Validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to config file (default: find failover.yaml)
    #[arg(short, long)]
    pub file: Option<Utf8PathBuf>,
}
