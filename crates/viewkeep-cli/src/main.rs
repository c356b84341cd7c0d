//! Viewkeep CLI
//!
//! Maintenance tool for the Viewkeep view-state store: inspect cached
//! entries, clear state for a file or for everything, and print summary
//! statistics.
//!
//! ```bash
//! viewkeep show                  # list cached files
//! viewkeep show /path/to/file    # one file's snapshots in detail
//! viewkeep clear /path/to/file   # drop one file's state
//! viewkeep clear --all           # drop everything
//! viewkeep stats                 # table counts and options
//! ```
//!
//! All commands accept `--store <path>` to operate on a store other than
//! the default `~/.viewkeep/state.json`.

mod args;
mod commands;
mod console;
mod router;

use clap::Parser;
use viewkeep_core::error::ViewkeepResult;

// Re-export for external use
pub use args::{Cli, Commands};

#[tokio::main]
async fn main() -> ViewkeepResult<()> {
    // Initialize logging with environment-based filtering
    // Set RUST_LOG=debug for verbose logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    router::route(cli).await
}
