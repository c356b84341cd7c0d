//! View lifecycle bridge
//!
//! Hosts forward their view events here. Loading a view restores its state,
//! saving records it as ground truth, closing records it without evicting
//! other unsaved variants, and a native unfold-all drops the file's cached
//! entry. Nothing in this module fails loudly: a view without a backing
//! file is simply skipped.

use crate::editor::adapter::{EditorAdapter, ViewId};
use crate::error::ViewkeepResult;
use crate::policy::RetentionPolicy;
use crate::service::ViewStateCache;
use crate::types::ClearScope;
use std::sync::Arc;

/// Host command name whose invocation drops a file's cached state.
pub const UNFOLD_ALL_COMMAND: &str = "unfold_all";

/// Drives the cache from host view events.
pub struct ViewEventListener {
    cache: ViewStateCache,
    editor: Arc<dyn EditorAdapter>,
}

impl ViewEventListener {
    pub fn new(cache: ViewStateCache, editor: Arc<dyn EditorAdapter>) -> Self {
        Self { cache, editor }
    }

    /// Restore state when a view finishes loading.
    pub async fn on_load(&self, view: ViewId) -> ViewkeepResult<()> {
        match self.editor.file_id(view) {
            Some(file_id) => self.restore_view(view, &file_id).await,
            None => Ok(()),
        }
    }

    /// Record state after an explicit save. The saved content is ground
    /// truth for the file, so older snapshots are purged.
    pub async fn on_post_save(&self, view: ViewId) -> ViewkeepResult<()> {
        self.record_view(view, RetentionPolicy::CleanExisting).await
    }

    /// Record state when a view closes, hot exit included. The buffer may
    /// be one of several unsaved variants, so other snapshots stay.
    pub async fn on_close(&self, view: ViewId) -> ViewkeepResult<()> {
        self.record_view(view, RetentionPolicy::KeepExisting).await
    }

    /// Mirror a native unfold-all: a deliberately unfolded file has no
    /// state worth restoring, so its cached entry goes away.
    pub async fn on_text_command(&self, view: ViewId, command: &str) -> ViewkeepResult<()> {
        if command == UNFOLD_ALL_COMMAND {
            if let Some(file_id) = self.editor.file_id(view) {
                return self.cache.clear(ClearScope::File(file_id)).await;
            }
        }
        Ok(())
    }

    /// Restore every open view that has a backing file. Hosts call this
    /// once at startup, after their windows are up.
    pub async fn restore_open_views(&self) -> ViewkeepResult<()> {
        for view in self.editor.open_views() {
            if let Some(file_id) = self.editor.file_id(view) {
                self.restore_view(view, &file_id).await?;
            }
        }
        Ok(())
    }

    async fn restore_view(&self, view: ViewId, file_id: &str) -> ViewkeepResult<()> {
        let content = self.editor.content(view);
        let content_len = self.editor.content_len(view);
        let restored = self.cache.restore(file_id, &content, content_len).await?;

        if !restored.folds.is_empty() {
            self.editor.fold(view, &restored.folds);
        }
        if let Some(selections) = restored.selections {
            self.editor.select(view, &selections);
        }
        Ok(())
    }

    async fn record_view(&self, view: ViewId, policy: RetentionPolicy) -> ViewkeepResult<()> {
        let Some(file_id) = self.editor.file_id(view) else {
            return Ok(());
        };
        let content = self.editor.content(view);
        let content_len = self.editor.content_len(view);
        let folds = self.editor.folded_regions(view);
        let selections = Some(self.editor.selected_regions(view));

        self.cache
            .save(&file_id, &content, content_len, folds, selections, policy)
            .await
    }
}
