//! Error types for readflow.

use thiserror::Error;

/// Result type alias for readflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building the document model.
#[derive(Error, Debug)]
pub enum Error {
    /// The decoder could not supply text runs for a page. Text is the
    /// backbone of the model, so this aborts the whole document.
    #[error("Text extraction failed on page {page}: {message}")]
    TextExtract { page: u32, message: String },

    /// The decoder could not report page dimensions.
    #[error("Page geometry unavailable for page {page}: {message}")]
    PageGeometry { page: u32, message: String },

    /// Page rasterization failed. Handled per page inside the pipeline
    /// (the page loses its images); surfaced only from direct calls.
    #[error("Rasterization failed on page {page}: {message}")]
    Rasterize { page: u32, message: String },

    /// The decoder could not open the document at all.
    #[error("Document could not be opened: {0}")]
    DocumentOpen(String),

    /// The run was cancelled between pages. No partial model is published.
    #[error("Processing cancelled")]
    Cancelled,

    /// Error serializing the document model.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
