//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "viewkeep")]
#[command(about = "Inspect and maintain the Viewkeep view-state store")]
#[command(
    long_about = r#"Inspect and maintain the Viewkeep view-state store

USAGE:
  viewkeep show                  # List cached files
  viewkeep show <file>           # One file's snapshots in detail
  viewkeep clear <file>          # Drop one file's state
  viewkeep clear --all           # Drop everything
  viewkeep stats                 # Table counts and options

The store defaults to ~/.viewkeep/state.json; pass --store to use another."#
)]
#[command(version)]
pub struct Cli {
    /// Path to the state store file
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List cached files, or show one file's snapshots in full
    Show {
        /// File to show in detail (all files when omitted)
        file: Option<String>,
    },

    /// Remove cached state for a file, or for everything
    Clear {
        /// File to clear; the '*' wildcard clears everything
        file: Option<String>,

        /// Clear every cached entry
        #[arg(long, conflicts_with = "file")]
        all: bool,
    },

    /// Show summary statistics for the store
    Stats,
}
