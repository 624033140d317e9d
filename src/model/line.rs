//! Line-level types.
//!
//! A chapter's content is an ordered stream of [`Line`] values: text lines
//! produced by the aggregator, plus zero-width image and page-break markers
//! injected by the structural merger.

use serde::{Deserialize, Serialize};

use super::Image;

/// A reading-order text line aggregated from glyph runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextLine {
    /// Rounded vertical coordinate, the aggregation grouping key.
    /// Page space grows upward, so larger values sit higher on the page.
    pub y: i32,

    /// Normalized concatenated text of all runs on this baseline.
    pub text: String,

    /// Largest font size observed among the line's runs, in page units.
    pub font_size: f32,

    /// First non-empty font name seen among the line's runs.
    pub font_name: String,

    /// Owning page number (1-indexed).
    pub page: u32,
}

impl TextLine {
    /// Trimmed text content.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// A line with fewer than two visible characters carries no signal for
    /// page classification or segmentation.
    pub fn is_trivial(&self) -> bool {
        self.trimmed().chars().count() < 2
    }
}

/// A page-break marker inserted between lines of different pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageBreakLine {
    /// The page being left.
    pub page: u32,
    /// Footer text of that page, lines joined with a double space.
    pub footer: Option<String>,
}

/// One element of a chapter's merged line stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Line {
    /// An aggregated text line.
    Text(TextLine),
    /// An extracted image at its vertical midpoint.
    Image(Image),
    /// A page boundary.
    PageBreak(PageBreakLine),
}

impl Line {
    /// Owning page number.
    pub fn page(&self) -> u32 {
        match self {
            Line::Text(t) => t.page,
            Line::Image(i) => i.page,
            Line::PageBreak(b) => b.page,
        }
    }

    /// Vertical position used for reading-order interleaving.
    pub fn y(&self) -> f32 {
        match self {
            Line::Text(t) => t.y as f32,
            Line::Image(i) => i.pdf_y,
            // Breaks are inserted positionally, never sorted by Y.
            Line::PageBreak(_) => 0.0,
        }
    }
}
