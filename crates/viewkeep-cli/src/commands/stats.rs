//! Store summary statistics

use crate::console::CLIConsole;
use viewkeep_core::ViewStateCache;
use viewkeep_core::error::ViewkeepResult;

/// Print table counts and the document's options.
pub async fn run(cache: &ViewStateCache, console: &CLIConsole) -> ViewkeepResult<()> {
    let stats = cache.stats().await?;

    console.print_header("Viewkeep store");
    println!("Files with folds:        {}", stats.fold_files);
    println!("Fold snapshots:          {}", stats.fold_snapshots);
    println!("Files with selections:   {}", stats.selection_files);
    println!("Selection snapshots:     {}", stats.selection_snapshots);
    println!("Max buffer size:         {}", stats.max_buffer_size);
    println!("Save selections:         {}", stats.save_selections);
    Ok(())
}
