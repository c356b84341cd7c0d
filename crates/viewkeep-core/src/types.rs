//! Core data types shared across the crate

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Identifier for a file as supplied by the host editor (an absolute path).
///
/// The crate never interprets the value beyond equality; it is an opaque key.
pub type FileId = String;

/// An ordered list of regions, exactly as captured from a view.
pub type RangeList = Vec<Region>;

/// Snapshots for one file, keyed by content checksum.
pub type ChecksumTable = BTreeMap<Checksum, RangeList>;

/// One of the document's two state tables: file id to per-checksum snapshots.
pub type FileTable = BTreeMap<FileId, ChecksumTable>;

/// A half-open region of a text buffer, in the host's character offsets.
///
/// Serialized as a two-element array `[start, end]`. Construction and
/// deserialization normalize so that `start <= end`; hosts report reversed
/// selections when the caret sits before the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    /// Create a region, swapping the bounds if they arrive reversed.
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Length of the region in host offset units.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for zero-width regions (bare caret positions).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<(usize, usize)> for Region {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

impl From<Region> for (usize, usize) {
    fn from(region: Region) -> Self {
        (region.start, region.end)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// A rendered content checksum, e.g. `"0x414fa339"`.
///
/// Stored and compared as the rendered string; two checksums match only on
/// byte equality. Serialization is transparent so the value doubles as a
/// JSON object key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checksum(pub String);

impl Checksum {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Checksum {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Checksum {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Wildcard accepted by clear operations in place of a file id.
pub const CLEAR_ALL_WILDCARD: &str = "*";

/// Target of a clear operation: one file's entries, or every entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearScope {
    /// Remove the entries of a single file from both tables.
    File(FileId),
    /// Remove every file's entries from both tables.
    All,
}

impl ClearScope {
    pub fn file(id: impl Into<FileId>) -> Self {
        Self::File(id.into())
    }
}

impl From<&str> for ClearScope {
    fn from(s: &str) -> Self {
        if s == CLEAR_ALL_WILDCARD {
            Self::All
        } else {
            Self::File(s.to_string())
        }
    }
}

impl FromStr for ClearScope {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}
