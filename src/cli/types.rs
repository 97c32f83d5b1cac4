//! CLI type definitions.
//!
//! Clap command structures defining the `herald` interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "herald")]
#[command(about = "Moves project items linked to merged pull requests into QA Testing", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one reconciliation pass
    Run(RunArgs),

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Compute and log decisions without mutating the board
    #[arg(long)]
    pub dry_run: bool,

    /// Load configuration from a specific file instead of .herald/
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration (token redacted)
    Show {
        /// Load configuration from a specific file instead of .herald/
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
