//! Settings store backends
//!
//! The document layer reads and writes individual top-level keys through
//! [`SettingsStore`] and decides when the result becomes durable. Reads never
//! fail: a missing or unreadable backing file degrades to an empty document,
//! so only `persist` surfaces errors.

use crate::error::{ViewkeepError, ViewkeepResult};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::fs;
use tokio::sync::RwLock;

/// Key-value access to the underlying settings document.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read a top-level key, if present.
    async fn get(&self, key: &str) -> Option<Value>;

    /// Write a top-level key.
    async fn set(&self, key: &str, value: Value);

    /// Remove a top-level key.
    async fn erase(&self, key: &str);

    /// All top-level keys currently present.
    async fn keys(&self) -> Vec<String>;

    /// Flush the current state to durable storage.
    async fn persist(&self) -> ViewkeepResult<()>;
}

/// File-backed store holding the document as a single JSON object.
///
/// The file is read lazily on first access and mirrored in memory; every
/// `persist` rewrites the whole file.
#[derive(Debug)]
pub struct JsonFileStore {
    /// Path of the backing file
    path: PathBuf,
    /// In-memory mirror; `None` until first access
    state: RwLock<Option<Map<String, Value>>>,
}

impl JsonFileStore {
    /// Create a store backed by the given file. The file is not touched
    /// until the first read or persist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: RwLock::new(None),
        }
    }

    /// Create a store at the default location, `~/.viewkeep/state.json`.
    pub fn at_default_path() -> Self {
        Self::new(crate::config::default_store_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the backing file, degrading to an empty document on
    /// any failure.
    async fn read_file(&self) -> Map<String, Value> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(map)) => {
                    tracing::debug!("Loaded settings store from {:?}", self.path);
                    map
                }
                Ok(_) => {
                    tracing::warn!(
                        "Settings store at {:?} is not a JSON object, starting empty",
                        self.path
                    );
                    Map::new()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse settings store: {}, starting empty", e);
                    Map::new()
                }
            },
            Err(e) => {
                tracing::debug!("No settings store file at {:?}: {}", self.path, e);
                Map::new()
            }
        }
    }

    async fn ensure_loaded<'a>(
        &self,
        state: &'a mut Option<Map<String, Value>>,
    ) -> &'a mut Map<String, Value> {
        if state.is_none() {
            *state = Some(self.read_file().await);
        }
        state.get_or_insert_with(Map::new)
    }
}

#[async_trait]
impl SettingsStore for JsonFileStore {
    async fn get(&self, key: &str) -> Option<Value> {
        let mut state = self.state.write().await;
        self.ensure_loaded(&mut state).await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: Value) {
        let mut state = self.state.write().await;
        self.ensure_loaded(&mut state)
            .await
            .insert(key.to_string(), value);
    }

    async fn erase(&self, key: &str) {
        let mut state = self.state.write().await;
        self.ensure_loaded(&mut state).await.remove(key);
    }

    async fn keys(&self) -> Vec<String> {
        let mut state = self.state.write().await;
        self.ensure_loaded(&mut state)
            .await
            .keys()
            .cloned()
            .collect()
    }

    async fn persist(&self) -> ViewkeepResult<()> {
        let content = {
            let mut state = self.state.write().await;
            let map = self.ensure_loaded(&mut state).await;
            serde_json::to_string_pretty(&Value::Object(map.clone()))?
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                ViewkeepError::store(format!("Failed to create store directory: {}", e))
            })?;
        }

        // Write to a sibling temp file and rename it into place so a crash
        // mid-write cannot leave a truncated store behind.
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, content)
            .await
            .map_err(|e| ViewkeepError::store(format!("Failed to write store: {}", e)))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| ViewkeepError::store(format!("Failed to replace store: {}", e)))?;

        tracing::debug!("Saved settings store to {:?}", self.path);
        Ok(())
    }
}

/// In-memory store for tests and for embedding without a settings file.
///
/// Tracks how many times `persist` was called so callers can assert that
/// read-only paths stay read-only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<Map<String, Value>>,
    persist_count: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing document body. Non-object values
    /// seed an empty store.
    pub fn with_contents(value: Value) -> Self {
        let map = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            state: RwLock::new(map),
            persist_count: AtomicUsize::new(0),
        }
    }

    /// Number of times `persist` has been called.
    pub fn persist_count(&self) -> usize {
        self.persist_count.load(Ordering::SeqCst)
    }

    /// Copy of the current document body.
    pub async fn snapshot(&self) -> Map<String, Value> {
        self.state.read().await.clone()
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<Value> {
        self.state.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: Value) {
        self.state.write().await.insert(key.to_string(), value);
    }

    async fn erase(&self, key: &str) {
        self.state.write().await.remove(key);
    }

    async fn keys(&self) -> Vec<String> {
        self.state.read().await.keys().cloned().collect()
    }

    async fn persist(&self) -> ViewkeepResult<()> {
        self.persist_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
