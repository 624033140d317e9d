//! Extraction stages: glyph runs to lines, TOC detection, chapter
//! segmentation, image recovery, and structural merging.

pub mod chapters;
pub mod images;
pub mod lines;
pub mod merge;
pub mod toc;

pub use chapters::segment_chapters;
pub use images::extract_page_images;
pub use lines::{aggregate_lines, median_font_size};
pub use merge::merge_chapter;
pub use toc::TocDetector;
