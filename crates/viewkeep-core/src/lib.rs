//! Viewkeep Core Library
//!
//! Persistent, content-addressed caching of editor view state: fold and
//! selection regions per file, keyed by absolute path and a checksum of the
//! buffer content, stored in a single versioned JSON document. State comes
//! back only when a file's content matches what was recorded, so a restore
//! never folds the wrong lines.

pub mod checksum;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod guard;
pub mod policy;
pub mod service;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use checksum::content_checksum;
pub use document::{CURRENT_VERSION, StorageDocument, TableKind};
pub use editor::{CacheCommands, EditorAdapter, ViewEventListener, ViewId};
pub use error::{ViewkeepError, ViewkeepResult};
pub use policy::RetentionPolicy;
pub use service::{CacheStats, RestoredState, ViewStateCache};
pub use store::{JsonFileStore, MemoryStore, SettingsStore};
pub use types::*;
