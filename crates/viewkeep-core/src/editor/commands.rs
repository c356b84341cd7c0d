//! User-facing cache commands
//!
//! The three commands a host binds to its palette or menus: clear
//! everything, clear the active file, and unfold every open view.

use crate::editor::adapter::{EditorAdapter, ViewId};
use crate::error::ViewkeepResult;
use crate::service::ViewStateCache;
use crate::types::ClearScope;
use std::sync::Arc;

/// Palette commands over the cache and the open views.
pub struct CacheCommands {
    cache: ViewStateCache,
    editor: Arc<dyn EditorAdapter>,
}

impl CacheCommands {
    pub fn new(cache: ViewStateCache, editor: Arc<dyn EditorAdapter>) -> Self {
        Self { cache, editor }
    }

    /// Drop every cached entry, then unfold every open view.
    pub async fn clear_all(&self) -> ViewkeepResult<()> {
        self.cache.clear(ClearScope::All).await?;
        self.unfold_all();
        Ok(())
    }

    /// Unfold the active view fully and drop its cached entry.
    ///
    /// Does nothing when no view is active or the active view has no
    /// backing file; hosts grey the command out via
    /// [`clear_current_enabled`](Self::clear_current_enabled).
    pub async fn clear_current(&self) -> ViewkeepResult<()> {
        let Some((view, file_id)) = self.current_target() else {
            return Ok(());
        };
        self.editor.unfold_all(view);
        self.cache.clear(ClearScope::File(file_id)).await
    }

    /// Whether clear-current has a target right now.
    pub fn clear_current_enabled(&self) -> bool {
        self.current_target().is_some()
    }

    /// Unfold every open view. The cache is left alone.
    pub fn unfold_all(&self) {
        for view in self.editor.open_views() {
            self.editor.unfold_all(view);
        }
    }

    fn current_target(&self) -> Option<(ViewId, String)> {
        let view = self.editor.active_view()?;
        let file_id = self.editor.file_id(view)?;
        Some((view, file_id))
    }
}
