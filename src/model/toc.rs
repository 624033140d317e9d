//! Table-of-contents types.

use serde::{Deserialize, Serialize};

/// A single table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Display text, without the dot leader or trailing page number.
    pub text: String,

    /// Target page number, absent for section labels.
    pub page: Option<u32>,

    /// Indent level: 0 = top-level, 1 = sub, 2 = sub-sub.
    pub level: u8,
}

impl TocEntry {
    pub fn new(text: impl Into<String>, page: Option<u32>, level: u8) -> Self {
        Self {
            text: text.into(),
            page,
            level: level.min(2),
        }
    }
}

/// The document's table of contents. At most one per document, assembled
/// from the unbroken run of TOC pages in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Toc {
    /// The TOC header as printed, default "Contents".
    pub title: String,

    /// Entries in document order.
    pub entries: Vec<TocEntry>,
}

impl Toc {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
