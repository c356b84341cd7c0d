//! Show cached files and snapshot detail

use crate::console::CLIConsole;
use colored::*;
use std::collections::BTreeSet;
use viewkeep_core::error::ViewkeepResult;
use viewkeep_core::{StorageDocument, TableKind, ViewStateCache};

/// List cached files, or print one file's snapshots in full.
pub async fn run(
    cache: &ViewStateCache,
    console: &CLIConsole,
    file: Option<&str>,
) -> ViewkeepResult<()> {
    let document = cache.document().await?;

    match file {
        Some(file_id) => show_file(&document, console, file_id),
        None => show_all(&document, console),
    }

    Ok(())
}

fn show_all(document: &StorageDocument, console: &CLIConsole) {
    let mut files: BTreeSet<&String> = document.folds.keys().collect();
    files.extend(document.selections.keys());

    if files.is_empty() {
        console.warn("The store has no cached view state");
        return;
    }

    console.print_header("Cached files");
    for file_id in files {
        let fold_snapshots = document.folds.get(file_id).map_or(0, |t| t.len());
        let selection_snapshots = document.selections.get(file_id).map_or(0, |t| t.len());
        println!(
            "{}  {} fold / {} selection snapshots",
            file_id.bold(),
            fold_snapshots,
            selection_snapshots
        );
    }
}

fn show_file(document: &StorageDocument, console: &CLIConsole, file_id: &str) {
    console.print_header(&format!("View state for {}", file_id));

    let mut found = false;
    for kind in [TableKind::Folds, TableKind::Selections] {
        let Some(snapshots) = document.table(kind).get(file_id) else {
            continue;
        };
        found = true;
        println!("{}:", kind.key().cyan().bold());
        for (checksum, ranges) in snapshots {
            let rendered: Vec<String> = ranges.iter().map(|r| r.to_string()).collect();
            println!("  {}  {}", checksum.as_str().dimmed(), rendered.join(", "));
        }
    }

    if !found {
        console.warn("No cached state for this file");
    }
}
