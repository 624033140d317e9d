//! Chapter types.

use serde::{Deserialize, Serialize};

use super::{Block, Line};

/// Words-per-minute assumed for reading-time estimates.
const READING_WPM: usize = 220;

/// One segmented chapter of the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    /// Sequence index. 0 is reserved for the implicit "Preface" chapter.
    pub index: u32,

    /// Heading text that opened the chapter.
    pub title: String,

    /// Merged line stream (text, image, and page-break markers). Kept for
    /// classification; the presentation layer consumes `blocks`.
    #[serde(skip)]
    pub lines: Vec<Line>,

    /// First page the chapter appears on.
    pub page_start: u32,

    /// Classified content blocks, in stream order.
    pub blocks: Vec<Block>,
}

impl Chapter {
    /// Create an empty chapter opened by a heading.
    pub fn new(index: u32, title: impl Into<String>, page_start: u32) -> Self {
        Self {
            index,
            title: title.into(),
            lines: Vec::new(),
            page_start,
            blocks: Vec::new(),
        }
    }

    /// Total word count across all classified blocks.
    pub fn word_count(&self) -> usize {
        self.blocks
            .iter()
            .map(|b| b.plain_text().split_whitespace().count())
            .sum()
    }

    /// Estimated reading time in whole minutes, at least 1.
    pub fn reading_minutes(&self) -> usize {
        self.word_count().div_ceil(READING_WPM).max(1)
    }

    /// Human-readable reading time, e.g. "1 min read" or "7 min read".
    pub fn read_time(&self) -> String {
        format!("{} min read", self.reading_minutes())
    }
}
