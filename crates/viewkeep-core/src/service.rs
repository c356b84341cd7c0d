//! The cache service: restore, save, and clear view state
//!
//! Every operation is one load-mutate-persist cycle against the settings
//! store. Read paths load without committing a pending migration; mutating
//! paths commit it first, so a stale store becomes durable the moment
//! anything writes.

use crate::checksum::content_checksum;
use crate::document::{StorageDocument, TableKind};
use crate::error::ViewkeepResult;
use crate::guard::should_skip;
use crate::policy::RetentionPolicy;
use crate::store::SettingsStore;
use crate::types::{ClearScope, RangeList};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// View state recovered for a file at its current content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoredState {
    /// Fold regions recorded for this exact content, oldest first.
    pub folds: RangeList,
    /// Selection regions, present only when selection persistence is on
    /// and a snapshot exists for this content.
    pub selections: Option<RangeList>,
}

impl RestoredState {
    pub fn is_empty(&self) -> bool {
        self.folds.is_empty() && self.selections.is_none()
    }
}

/// Summary counts over the persisted document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub fold_files: usize,
    pub fold_snapshots: usize,
    pub selection_files: usize,
    pub selection_snapshots: usize,
    pub max_buffer_size: usize,
    pub save_selections: bool,
}

/// Persistent cache of per-file fold and selection state, addressed by
/// content checksum.
#[derive(Clone)]
pub struct ViewStateCache {
    store: Arc<dyn SettingsStore>,
}

impl ViewStateCache {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Wrap a concrete store without spelling out the `Arc`.
    pub fn with_store(store: impl SettingsStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Look up the state recorded for a file at its current content.
    ///
    /// Purely a read: a stale store is reset in memory but nothing is
    /// written back, and an oversized buffer returns empty state without
    /// consulting the tables. Applying the result to a view is the
    /// caller's business.
    pub async fn restore(
        &self,
        file_id: &str,
        content: &str,
        content_len: usize,
    ) -> ViewkeepResult<RestoredState> {
        let document = StorageDocument::load(self.store.as_ref(), false).await?;

        if should_skip(content_len, document.max_buffer_size) {
            tracing::debug!("Skipping restore for {}: buffer over the size cap", file_id);
            return Ok(RestoredState::default());
        }

        let checksum = content_checksum(content);
        let folds = document
            .snapshot(TableKind::Folds, file_id, &checksum)
            .cloned()
            .unwrap_or_default();
        let selections = if document.save_selections {
            document
                .snapshot(TableKind::Selections, file_id, &checksum)
                .cloned()
        } else {
            None
        };

        Ok(RestoredState { folds, selections })
    }

    /// Record a file's state under its current content checksum.
    ///
    /// Loads with the migration commit enabled, so the first save after an
    /// upgrade makes the reset durable even when the size guard then skips
    /// the content. Selections are recorded only when the document enables
    /// them; `None` counts as empty and removes the file's selections
    /// entry. Both table updates land in a single persist.
    pub async fn save(
        &self,
        file_id: &str,
        content: &str,
        content_len: usize,
        folds: RangeList,
        selections: Option<RangeList>,
        policy: RetentionPolicy,
    ) -> ViewkeepResult<()> {
        let mut document = StorageDocument::load(self.store.as_ref(), true).await?;

        if should_skip(content_len, document.max_buffer_size) {
            tracing::debug!("Skipping save for {}: buffer over the size cap", file_id);
            return Ok(());
        }

        let checksum = content_checksum(content);
        policy.apply_to(
            document.table_mut(TableKind::Folds),
            file_id,
            &checksum,
            folds,
        );
        if document.save_selections {
            policy.apply_to(
                document.table_mut(TableKind::Selections),
                file_id,
                &checksum,
                selections.unwrap_or_default(),
            );
        }

        document.persist(self.store.as_ref()).await
    }

    /// Drop cached state for one file, or for everything.
    ///
    /// Options and the format version are left as they are; only the two
    /// tables are touched. Persists once.
    pub async fn clear(&self, scope: ClearScope) -> ViewkeepResult<()> {
        let mut document = StorageDocument::load(self.store.as_ref(), true).await?;

        match &scope {
            ClearScope::File(file_id) => {
                if document.remove_file(file_id) {
                    tracing::debug!("Cleared cached view state for {}", file_id);
                }
            }
            ClearScope::All => {
                document.clear_all_files();
                tracing::debug!("Cleared all cached view state");
            }
        }

        document.persist(self.store.as_ref()).await
    }

    /// Summary counts over the current document. Read-only.
    pub async fn stats(&self) -> ViewkeepResult<CacheStats> {
        let document = self.document().await?;
        Ok(CacheStats {
            fold_files: document.folds.len(),
            fold_snapshots: document.folds.values().map(|t| t.len()).sum(),
            selection_files: document.selections.len(),
            selection_snapshots: document.selections.values().map(|t| t.len()).sum(),
            max_buffer_size: document.max_buffer_size,
            save_selections: document.save_selections,
        })
    }

    /// The current document, for inspection. Read-only.
    pub async fn document(&self) -> ViewkeepResult<StorageDocument> {
        StorageDocument::load(self.store.as_ref(), false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::Region;
    use serde_json::json;

    fn cache_over(store: Arc<MemoryStore>) -> ViewStateCache {
        ViewStateCache::new(store)
    }

    fn regions(pairs: &[(usize, usize)]) -> RangeList {
        pairs.iter().map(|&(a, b)| Region::new(a, b)).collect()
    }

    #[tokio::test]
    async fn test_save_then_restore_roundtrip_in_order() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_over(store.clone());
        let folds = regions(&[(30, 40), (1, 2), (10, 15)]);

        cache
            .save("/a.rs", "fn main() {}", 12, folds.clone(), None, RetentionPolicy::CleanExisting)
            .await
            .unwrap();

        let restored = cache.restore("/a.rs", "fn main() {}", 12).await.unwrap();
        assert_eq!(restored.folds, folds);
        assert_eq!(restored.selections, None);
    }

    #[tokio::test]
    async fn test_restore_is_idempotent_and_read_only() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_over(store.clone());

        cache
            .save("/a.rs", "abc", 3, regions(&[(0, 1)]), None, RetentionPolicy::CleanExisting)
            .await
            .unwrap();
        let writes_after_save = store.persist_count();

        let first = cache.restore("/a.rs", "abc", 3).await.unwrap();
        let second = cache.restore("/a.rs", "abc", 3).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.persist_count(), writes_after_save);
    }

    #[tokio::test]
    async fn test_restore_on_stale_store_writes_nothing() {
        let store = Arc::new(MemoryStore::with_contents(json!({
            "/legacy.py": [[0, 4]],
        })));
        let cache = cache_over(store.clone());

        let restored = cache.restore("/legacy.py", "anything", 8).await.unwrap();

        assert!(restored.is_empty());
        assert_eq!(store.persist_count(), 0);
    }

    #[tokio::test]
    async fn test_changed_content_restores_nothing() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_over(store.clone());

        cache
            .save("/a.rs", "version one", 11, regions(&[(2, 6)]), None, RetentionPolicy::CleanExisting)
            .await
            .unwrap();

        let restored = cache.restore("/a.rs", "version two", 11).await.unwrap();
        assert!(restored.folds.is_empty());
    }

    #[tokio::test]
    async fn test_close_accumulates_save_purges() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_over(store.clone());

        // Two unsaved variants recorded on close keep their own snapshots.
        cache
            .save("/a.rs", "v1", 2, regions(&[(0, 1)]), None, RetentionPolicy::KeepExisting)
            .await
            .unwrap();
        cache
            .save("/a.rs", "v2", 2, regions(&[(1, 2)]), None, RetentionPolicy::KeepExisting)
            .await
            .unwrap();

        let document = cache.document().await.unwrap();
        assert_eq!(document.folds.get("/a.rs").map(|t| t.len()), Some(2));

        // An explicit save is ground truth and purges the rest.
        cache
            .save("/a.rs", "v3", 2, regions(&[(0, 2)]), None, RetentionPolicy::CleanExisting)
            .await
            .unwrap();

        let document = cache.document().await.unwrap();
        let snapshots = document.folds.get("/a.rs").unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(
            snapshots.get(&content_checksum("v3")),
            Some(&regions(&[(0, 2)]))
        );
    }

    #[tokio::test]
    async fn test_empty_save_removes_the_file_entry() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_over(store.clone());

        cache
            .save("/a.rs", "abc", 3, regions(&[(0, 1)]), None, RetentionPolicy::KeepExisting)
            .await
            .unwrap();
        cache
            .save("/a.rs", "abcd", 4, RangeList::new(), None, RetentionPolicy::KeepExisting)
            .await
            .unwrap();

        let document = cache.document().await.unwrap();
        assert!(!document.folds.contains_key("/a.rs"));
    }

    #[tokio::test]
    async fn test_size_guard_skips_save_without_touching_store() {
        let store = Arc::new(MemoryStore::with_contents(json!({
            "version": 1,
            "max_buffer_size": 10,
            "save_selections": false,
            "folds": {"/kept.rs": {"0x1": [[3, 4]]}},
            "selections": {},
        })));
        let cache = cache_over(store.clone());
        let before = store.snapshot().await;

        cache
            .save("/big.rs", "x".repeat(11).as_str(), 11, regions(&[(0, 5)]), None, RetentionPolicy::CleanExisting)
            .await
            .unwrap();

        assert_eq!(store.snapshot().await, before);
        assert_eq!(store.persist_count(), 0);
    }

    #[tokio::test]
    async fn test_size_guard_skips_restore() {
        let big = "y".repeat(11);
        let checksum = content_checksum(&big);
        let store = Arc::new(MemoryStore::with_contents(json!({
            "version": 1,
            "max_buffer_size": 10,
            "save_selections": false,
            "folds": {"/big.rs": {(checksum.as_str()): [[0, 5]]}},
            "selections": {},
        })));
        let cache = cache_over(store.clone());

        // A snapshot exists for this exact content, but the guard wins.
        let restored = cache.restore("/big.rs", &big, 11).await.unwrap();
        assert!(restored.is_empty());
    }

    #[tokio::test]
    async fn test_clear_single_file_leaves_others() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_over(store.clone());

        cache
            .save("/a.rs", "aa", 2, regions(&[(0, 1)]), None, RetentionPolicy::CleanExisting)
            .await
            .unwrap();
        cache
            .save("/b.rs", "bb", 2, regions(&[(1, 2)]), None, RetentionPolicy::CleanExisting)
            .await
            .unwrap();

        cache.clear(ClearScope::file("/a.rs")).await.unwrap();

        let document = cache.document().await.unwrap();
        assert!(!document.folds.contains_key("/a.rs"));
        assert!(document.folds.contains_key("/b.rs"));
    }

    #[tokio::test]
    async fn test_clear_all_keeps_options() {
        let store = Arc::new(MemoryStore::with_contents(json!({
            "version": 1,
            "max_buffer_size": 555,
            "save_selections": true,
            "folds": {"/a.rs": {"0x1": [[0, 1]]}},
            "selections": {"/a.rs": {"0x1": [[2, 2]]}},
        })));
        let cache = cache_over(store.clone());

        cache.clear("*".parse().unwrap()).await.unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.get("folds"), Some(&json!({})));
        assert_eq!(snapshot.get("selections"), Some(&json!({})));
        assert_eq!(snapshot.get("max_buffer_size"), Some(&json!(555)));
        assert_eq!(snapshot.get("save_selections"), Some(&json!(true)));
        assert_eq!(snapshot.get("version"), Some(&json!(1)));
    }

    #[tokio::test]
    async fn test_selections_only_recorded_when_enabled() {
        let disabled = Arc::new(MemoryStore::new());
        let cache = cache_over(disabled.clone());

        cache
            .save(
                "/a.rs",
                "abc",
                3,
                regions(&[(0, 1)]),
                Some(regions(&[(2, 2)])),
                RetentionPolicy::CleanExisting,
            )
            .await
            .unwrap();

        let document = cache.document().await.unwrap();
        assert!(document.selections.is_empty());
        let restored = cache.restore("/a.rs", "abc", 3).await.unwrap();
        assert_eq!(restored.selections, None);

        let enabled = Arc::new(MemoryStore::with_contents(json!({
            "version": 1,
            "max_buffer_size": 1_000_000,
            "save_selections": true,
            "folds": {},
            "selections": {},
        })));
        let cache = cache_over(enabled.clone());

        cache
            .save(
                "/a.rs",
                "abc",
                3,
                regions(&[(0, 1)]),
                Some(regions(&[(2, 2)])),
                RetentionPolicy::CleanExisting,
            )
            .await
            .unwrap();

        let restored = cache.restore("/a.rs", "abc", 3).await.unwrap();
        assert_eq!(restored.selections, Some(regions(&[(2, 2)])));
    }

    #[tokio::test]
    async fn test_absent_selections_count_as_empty_when_enabled() {
        let store = Arc::new(MemoryStore::with_contents(json!({
            "version": 1,
            "max_buffer_size": 1_000_000,
            "save_selections": true,
            "folds": {},
            "selections": {},
        })));
        let cache = cache_over(store.clone());

        cache
            .save(
                "/a.rs",
                "abc",
                3,
                regions(&[(0, 1)]),
                Some(regions(&[(2, 3)])),
                RetentionPolicy::CleanExisting,
            )
            .await
            .unwrap();
        cache
            .save("/a.rs", "abc", 3, regions(&[(0, 1)]), None, RetentionPolicy::CleanExisting)
            .await
            .unwrap();

        let document = cache.document().await.unwrap();
        assert!(document.folds.contains_key("/a.rs"));
        assert!(!document.selections.contains_key("/a.rs"));
    }

    #[tokio::test]
    async fn test_first_save_commits_a_pending_migration() {
        let store = Arc::new(MemoryStore::with_contents(json!({
            "/old.py": [[1, 2]],
        })));
        let cache = cache_over(store.clone());

        cache
            .save("/new.rs", "abc", 3, regions(&[(0, 1)]), None, RetentionPolicy::CleanExisting)
            .await
            .unwrap();

        let snapshot = store.snapshot().await;
        assert!(!snapshot.contains_key("/old.py"));
        assert_eq!(snapshot.get("version"), Some(&json!(1)));
        assert!(store.persist_count() >= 1);
        let document = cache.document().await.unwrap();
        assert!(document.folds.contains_key("/new.rs"));
    }

    #[tokio::test]
    async fn test_end_to_end_document_shape() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_over(store.clone());

        cache
            .save(
                "/a.txt",
                "hello",
                5,
                regions(&[(10, 20), (30, 40)]),
                None,
                RetentionPolicy::CleanExisting,
            )
            .await
            .unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(
            serde_json::Value::Object(snapshot),
            json!({
                "version": 1,
                "max_buffer_size": 1_000_000,
                "save_selections": false,
                "folds": {"/a.txt": {"0x3610a686": [[10, 20], [30, 40]]}},
                "selections": {},
            })
        );

        // Content changed: nothing to restore.
        let restored = cache.restore("/a.txt", "hello!", 6).await.unwrap();
        assert!(restored.folds.is_empty());

        // Content back to the recorded bytes: state comes back.
        let restored = cache.restore("/a.txt", "hello", 5).await.unwrap();
        assert_eq!(restored.folds, regions(&[(10, 20), (30, 40)]));
    }

    #[tokio::test]
    async fn test_stats_counts_files_and_snapshots() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_over(store.clone());

        cache
            .save("/a.rs", "v1", 2, regions(&[(0, 1)]), None, RetentionPolicy::KeepExisting)
            .await
            .unwrap();
        cache
            .save("/a.rs", "v2", 2, regions(&[(1, 2)]), None, RetentionPolicy::KeepExisting)
            .await
            .unwrap();
        cache
            .save("/b.rs", "bb", 2, regions(&[(2, 3)]), None, RetentionPolicy::CleanExisting)
            .await
            .unwrap();

        let stats = cache.stats().await.unwrap();
        assert_eq!(stats.fold_files, 2);
        assert_eq!(stats.fold_snapshots, 3);
        assert_eq!(stats.selection_files, 0);
        assert_eq!(stats.max_buffer_size, 1_000_000);
        assert!(!stats.save_selections);
    }
}
