//! # readflow
//!
//! Turns a PDF's raw glyph-and-image geometry into a structured, semantic
//! document model — chapters, headings, paragraphs, code blocks, equations,
//! references, a table of contents, and embedded images — using only
//! typographic and positional signals.
//!
//! The PDF byte-stream decoder is an external collaborator behind the
//! [`PdfDecoder`] trait: it supplies positioned text runs, page geometry,
//! paint operations, rasterization, and footer lines. Everything in this
//! crate is a pure, idempotent transform from that input to a
//! [`DocumentModel`], rebuilt from scratch on every document load.
//!
//! ## Quick start
//!
//! ```no_run
//! use readflow::{Pipeline, ProcessOptions};
//!
//! fn open(decoder: &(impl readflow::PdfDecoder + Sync)) -> readflow::Result<()> {
//!     let model = Pipeline::new(decoder)
//!         .with_options(ProcessOptions::new())
//!         .run(Some(&|page, total| eprintln!("{page}/{total}")))?;
//!
//!     for chapter in &model.chapters {
//!         println!("{} ({})", chapter.title, chapter.read_time());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline stages
//!
//! 1. Glyph normalization — per-run repair of ligatures, Windows-1252
//!    misdecodes, control/private-use codepoints; NFC composition
//! 2. Line aggregation — glyph runs grouped into reading-order lines by
//!    rounded baseline
//! 3. TOC detection — table-of-contents pages classified and extracted
//! 4. Chapter segmentation — font-size and pattern heading heuristics
//! 5. Image extraction — bounding boxes from the paint-operation transform
//!    stack, cropped from a page raster
//! 6. Structural merging — images and page breaks interleaved in reading
//!    order
//! 7. Block classification — a streaming multi-signal classifier producing
//!    typed content blocks
//!
//! Every heuristic threshold is configurable through [`ProcessOptions`].

pub mod classify;
pub mod decoder;
pub mod error;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod options;
pub mod pipeline;

// Re-export commonly used types
pub use classify::language::detect_language;
pub use classify::BlockClassifier;
pub use decoder::{GlyphRun, PaintOp, PdfDecoder, RasterPage, Transform};
pub use error::{Error, Result};
pub use model::{
    Block, Chapter, DocumentModel, Image, ImageData, Line, Page, PageBreakLine, TextLine, Toc,
    TocEntry,
};
pub use options::ProcessOptions;
pub use pipeline::{CancelToken, Pipeline, ProgressFn};

/// Process one document with default options.
///
/// Convenience wrapper over [`Pipeline`]; `progress` receives
/// `(current_page, total_pages)` during the extraction phase.
pub fn process_document<D: PdfDecoder + Sync>(
    decoder: &D,
    progress: Option<&ProgressFn<'_>>,
) -> Result<DocumentModel> {
    Pipeline::new(decoder).run(progress)
}
