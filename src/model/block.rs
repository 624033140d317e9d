//! Typed content blocks.

use serde::{Deserialize, Serialize};

use super::{Image, TocEntry};

/// One classified content block within a chapter.
///
/// Produced by the block classifier in stream order; every non-blank input
/// line lands in exactly one block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Prose paragraph, hyphen-rejoined and punctuation-normalized.
    Paragraph { text: String },

    /// Section heading within a chapter. Level 2 or 3; level 1 is the
    /// chapter title itself.
    Heading { level: u8, text: String },

    /// Code block with original line breaks preserved and a best-effort
    /// language guess.
    Code {
        lines: Vec<String>,
        language: String,
    },

    /// Standalone display equation, with any trailing number split off
    /// as a label.
    Equation {
        expr: String,
        label: Option<String>,
    },

    /// A run of bibliography entries.
    References { entries: Vec<String> },

    /// A chapter-local mini table of contents.
    SectionToc { entries: Vec<TocEntry> },

    /// An embedded image.
    Image { image: Image },

    /// A page boundary, carrying the footer of the page being left.
    PageBreak { page: u32, footer: Option<String> },
}

impl Block {
    /// Plain text content, used for word counting.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Paragraph { text } | Block::Heading { text, .. } => text.clone(),
            Block::Code { lines, .. } => lines.join("\n"),
            Block::Equation { expr, .. } => expr.clone(),
            Block::References { entries } => entries.join("\n"),
            Block::SectionToc { entries } => entries
                .iter()
                .map(|e| e.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Image { .. } | Block::PageBreak { .. } => String::new(),
        }
    }
}
