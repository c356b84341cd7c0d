//! Clear cached state

use crate::console::CLIConsole;
use viewkeep_core::error::{ViewkeepError, ViewkeepResult};
use viewkeep_core::{ClearScope, ViewStateCache};

/// Remove one file's cached state, or everything with `--all` (or `'*'`).
pub async fn run(
    cache: &ViewStateCache,
    console: &CLIConsole,
    file: Option<&str>,
    all: bool,
) -> ViewkeepResult<()> {
    let scope = match (file, all) {
        (_, true) => ClearScope::All,
        (Some(file), false) => ClearScope::from(file),
        (None, false) => {
            console.error("Pass a file to clear, or --all for everything");
            return Err(ViewkeepError::invalid_input("missing clear target"));
        }
    };

    let message = match &scope {
        ClearScope::All => "Cleared all cached view state".to_string(),
        ClearScope::File(file_id) => format!("Cleared cached state for {}", file_id),
    };

    cache.clear(scope).await?;
    console.success(&message);
    Ok(())
}
