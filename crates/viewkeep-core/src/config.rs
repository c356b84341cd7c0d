//! Default locations and limits for the settings store
//!
//! The store lives in a single JSON file. The defaults here seed a fresh
//! document and back any field that fails to read; the effective values
//! always come from the document itself.

use std::path::PathBuf;

/// Default store file name
pub const STORE_FILE_NAME: &str = "state.json";
/// Store directory under the user's home
pub const STORE_DIR: &str = ".viewkeep";

/// Buffers longer than this are never cached or restored.
pub const DEFAULT_MAX_BUFFER_SIZE: usize = 1_000_000;
/// Selections are opt-in; only folds are cached by default.
pub const DEFAULT_SAVE_SELECTIONS: bool = false;

/// Resolve the default store path: `~/.viewkeep/state.json`.
pub fn default_store_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(STORE_DIR)
        .join(STORE_FILE_NAME)
}
