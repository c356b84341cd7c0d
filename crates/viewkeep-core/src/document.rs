//! The persisted settings document
//!
//! One JSON object holds everything: the format version, the two per-file
//! state tables, and the user-tunable options. Loading is lazy and tolerant.
//! Migration from an older or foreign layout is a reset in place, never a
//! conversion: view state is a cache, and stale state is worth less than a
//! clean slate.

use crate::config::{DEFAULT_MAX_BUFFER_SIZE, DEFAULT_SAVE_SELECTIONS};
use crate::error::ViewkeepResult;
use crate::store::SettingsStore;
use crate::types::{Checksum, FileTable, RangeList};
use serde_json::json;

/// Wire key of the format version
pub const VERSION_KEY: &str = "version";
/// Wire key of the buffer-size cap
pub const MAX_BUFFER_SIZE_KEY: &str = "max_buffer_size";
/// Wire key of the selections opt-in
pub const SAVE_SELECTIONS_KEY: &str = "save_selections";
/// Wire key of the folds table
pub const FOLDS_KEY: &str = "folds";
/// Wire key of the selections table
pub const SELECTIONS_KEY: &str = "selections";

/// Current document format version
pub const CURRENT_VERSION: i64 = 1;

/// The two per-file state tables in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Folds,
    Selections,
}

impl TableKind {
    /// Wire key of this table.
    pub fn key(self) -> &'static str {
        match self {
            TableKind::Folds => FOLDS_KEY,
            TableKind::Selections => SELECTIONS_KEY,
        }
    }
}

/// In-memory form of the settings document.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageDocument {
    /// Format version of the loaded document
    pub version: i64,
    /// Buffers longer than this are never cached or restored
    pub max_buffer_size: usize,
    /// Whether selections are cached alongside folds
    pub save_selections: bool,
    /// Fold state per file, keyed by content checksum
    pub folds: FileTable,
    /// Selection state per file, keyed by content checksum
    pub selections: FileTable,
}

impl Default for StorageDocument {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            max_buffer_size: DEFAULT_MAX_BUFFER_SIZE,
            save_selections: DEFAULT_SAVE_SELECTIONS,
            folds: FileTable::new(),
            selections: FileTable::new(),
        }
    }
}

impl StorageDocument {
    /// Load the document through the store.
    ///
    /// A missing, non-integer, or older `version` resets the document in
    /// place: every key in the store is discarded (including entries from
    /// the legacy layout that kept file paths at the top level) and the
    /// defaults are written back. `reset_if_stale` selects whether that
    /// reset is persisted immediately or rides along with the caller's next
    /// persist. Versions newer than [`CURRENT_VERSION`] are loaded as-is.
    pub async fn load(store: &dyn SettingsStore, reset_if_stale: bool) -> ViewkeepResult<Self> {
        let version = store.get(VERSION_KEY).await.and_then(|v| v.as_i64());

        match version {
            Some(version) if version >= CURRENT_VERSION => {
                Ok(Self::read_current(store, version).await)
            }
            _ => Self::reset(store, reset_if_stale).await,
        }
    }

    /// Read a current-version document field by field. Anything malformed
    /// falls back to its default; an unreadable field never fails a load.
    async fn read_current(store: &dyn SettingsStore, version: i64) -> Self {
        let max_buffer_size = match store.get(MAX_BUFFER_SIZE_KEY).await {
            None => DEFAULT_MAX_BUFFER_SIZE,
            Some(value) => value.as_u64().map(|v| v as usize).unwrap_or_else(|| {
                tracing::warn!(
                    "Malformed {} in store, using default",
                    MAX_BUFFER_SIZE_KEY
                );
                DEFAULT_MAX_BUFFER_SIZE
            }),
        };

        let save_selections = match store.get(SAVE_SELECTIONS_KEY).await {
            None => DEFAULT_SAVE_SELECTIONS,
            Some(value) => value.as_bool().unwrap_or_else(|| {
                tracing::warn!(
                    "Malformed {} in store, using default",
                    SAVE_SELECTIONS_KEY
                );
                DEFAULT_SAVE_SELECTIONS
            }),
        };

        let folds = Self::read_table(store, FOLDS_KEY).await;
        let selections = Self::read_table(store, SELECTIONS_KEY).await;

        Self {
            version,
            max_buffer_size,
            save_selections,
            folds,
            selections,
        }
    }

    async fn read_table(store: &dyn SettingsStore, key: &str) -> FileTable {
        match store.get(key).await {
            None => FileTable::new(),
            Some(value) => match serde_json::from_value(value) {
                Ok(table) => table,
                Err(e) => {
                    tracing::warn!("Failed to parse {} table: {}, starting empty", key, e);
                    FileTable::new()
                }
            },
        }
    }

    /// Replace whatever the store holds with a default document.
    async fn reset(store: &dyn SettingsStore, persist_now: bool) -> ViewkeepResult<Self> {
        // The selections opt-in is a user preference; keep it when readable.
        let save_selections = store
            .get(SAVE_SELECTIONS_KEY)
            .await
            .and_then(|v| v.as_bool())
            .unwrap_or(DEFAULT_SAVE_SELECTIONS);

        for key in store.keys().await {
            store.erase(&key).await;
        }

        let document = Self {
            save_selections,
            ..Self::default()
        };
        document.write_fields(store).await?;
        tracing::debug!(
            "Reset stale view-state document to version {}",
            CURRENT_VERSION
        );

        if persist_now {
            store.persist().await?;
        }

        Ok(document)
    }

    async fn write_fields(&self, store: &dyn SettingsStore) -> ViewkeepResult<()> {
        store.set(VERSION_KEY, json!(self.version)).await;
        store
            .set(MAX_BUFFER_SIZE_KEY, json!(self.max_buffer_size))
            .await;
        store
            .set(SAVE_SELECTIONS_KEY, json!(self.save_selections))
            .await;
        store.set(FOLDS_KEY, serde_json::to_value(&self.folds)?).await;
        store
            .set(SELECTIONS_KEY, serde_json::to_value(&self.selections)?)
            .await;
        Ok(())
    }

    /// Write every field back through the store and make the result durable.
    pub async fn persist(&self, store: &dyn SettingsStore) -> ViewkeepResult<()> {
        self.write_fields(store).await?;
        store.persist().await
    }

    pub fn table(&self, kind: TableKind) -> &FileTable {
        match kind {
            TableKind::Folds => &self.folds,
            TableKind::Selections => &self.selections,
        }
    }

    pub fn table_mut(&mut self, kind: TableKind) -> &mut FileTable {
        match kind {
            TableKind::Folds => &mut self.folds,
            TableKind::Selections => &mut self.selections,
        }
    }

    /// Ranges stored for one file at one checksum, if any.
    pub fn snapshot(
        &self,
        kind: TableKind,
        file_id: &str,
        checksum: &Checksum,
    ) -> Option<&RangeList> {
        self.table(kind)
            .get(file_id)
            .and_then(|table| table.get(checksum))
    }

    /// Remove one file's entries from both tables. Returns whether anything
    /// was removed.
    pub fn remove_file(&mut self, file_id: &str) -> bool {
        let removed_folds = self.folds.remove(file_id).is_some();
        let removed_selections = self.selections.remove(file_id).is_some();
        removed_folds || removed_selections
    }

    /// Drop every file's entries from both tables.
    pub fn clear_all_files(&mut self) {
        self.folds.clear();
        self.selections.clear();
    }
}
