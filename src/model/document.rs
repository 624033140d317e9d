//! Document-level model.

use serde::{Deserialize, Serialize};

use super::{Chapter, Toc};
use crate::error::Result;

/// The fully processed document model handed to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentModel {
    /// Chapters in document order, each with classified blocks.
    pub chapters: Vec<Chapter>,

    /// Extracted table of contents, if any TOC pages were found.
    pub toc: Option<Toc>,
}

impl DocumentModel {
    /// Total chapter count.
    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// Serialize the model to JSON (pretty or compact). Image pixel data
    /// is skipped; only geometry and metadata are emitted.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}
