//! The host-editor seam
//!
//! The cache never talks to an editor directly; hosts implement
//! [`EditorAdapter`] and the listener and commands drive everything through
//! it. The trait is synchronous because host view APIs are; the async cache
//! work happens a layer up.

use crate::types::{FileId, RangeList, Region};

/// Opaque handle to one open view in the host editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub u64);

/// The host editor surface the cache needs.
///
/// Query methods describe a view's current state; action methods change it.
/// A view with no backing file returns `None` from `file_id` and is
/// invisible to the cache.
pub trait EditorAdapter: Send + Sync {
    /// The currently focused view, if any.
    fn active_view(&self) -> Option<ViewId>;

    /// Every open view, across all windows.
    fn open_views(&self) -> Vec<ViewId>;

    /// Absolute path backing the view, or `None` for unsaved buffers.
    fn file_id(&self, view: ViewId) -> Option<FileId>;

    /// Full buffer content.
    fn content(&self, view: ViewId) -> String;

    /// Buffer length in the host's own units.
    fn content_len(&self, view: ViewId) -> usize;

    /// Currently folded regions, in the order the host reports them.
    fn folded_regions(&self, view: ViewId) -> RangeList;

    /// Current selection regions.
    fn selected_regions(&self, view: ViewId) -> RangeList;

    /// Fold the given regions.
    fn fold(&self, view: ViewId, regions: &[Region]);

    /// Replace the selection with the given regions.
    fn select(&self, view: ViewId, regions: &[Region]);

    /// Unfold the view's full range.
    fn unfold_all(&self, view: ViewId);
}
