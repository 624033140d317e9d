//! Document model types.
//!
//! Everything here is rebuilt in full on every document load; nothing is
//! shared or mutated across documents.

mod block;
mod chapter;
mod document;
mod image;
mod line;
mod page;
mod toc;

pub use block::Block;
pub use chapter::Chapter;
pub use document::DocumentModel;
pub use image::{Image, ImageData};
pub use line::{Line, PageBreakLine, TextLine};
pub use page::Page;
pub use toc::{Toc, TocEntry};
