//! Command routing

use crate::args::{Cli, Commands};
use crate::commands;
use crate::console::CLIConsole;
use std::sync::Arc;
use viewkeep_core::error::ViewkeepResult;
use viewkeep_core::{JsonFileStore, ViewStateCache};

/// Dispatch the parsed CLI to its command handler.
pub async fn route(cli: Cli) -> ViewkeepResult<()> {
    let console = CLIConsole::new(cli.verbose);

    let store = match &cli.store {
        Some(path) => JsonFileStore::new(path.clone()),
        None => JsonFileStore::at_default_path(),
    };
    console.info(&format!("Using store at {}", store.path().display()));
    let cache = ViewStateCache::new(Arc::new(store));

    match cli.command {
        Commands::Show { file } => commands::show::run(&cache, &console, file.as_deref()).await,
        Commands::Clear { file, all } => {
            commands::clear::run(&cache, &console, file.as_deref(), all).await
        }
        Commands::Stats => commands::stats::run(&cache, &console).await,
    }
}
