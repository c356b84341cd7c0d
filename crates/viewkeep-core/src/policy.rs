//! Retention of existing snapshots when new state is recorded

use crate::types::{Checksum, FileTable, RangeList};

/// What happens to a file's other checksum snapshots when new state lands.
///
/// An explicit save is ground truth for the file, so it purges everything
/// else. A close (including hot exit) may be one of several unsaved
/// variants of the file, so it only adds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetentionPolicy {
    /// Replace every snapshot of the file with the new one.
    CleanExisting,
    /// Keep snapshots recorded under other checksums.
    KeepExisting,
}

impl RetentionPolicy {
    /// Record `ranges` for `(file_id, checksum)` in `table`.
    ///
    /// An empty range list removes the file's entire entry instead,
    /// regardless of policy: empty state is never stored.
    pub fn apply_to(
        self,
        table: &mut FileTable,
        file_id: &str,
        checksum: &Checksum,
        ranges: RangeList,
    ) {
        if ranges.is_empty() {
            table.remove(file_id);
            return;
        }

        let entry = table.entry(file_id.to_string()).or_default();
        if self == Self::CleanExisting {
            entry.clear();
        }
        entry.insert(checksum.clone(), ranges);
    }
}
