//! Text repair for PDF extraction artifacts.
//!
//! Two layers: [`glyph`] fixes per-run character garbling before lines are
//! aggregated; [`prose`] fixes punctuation and line-wrap hyphenation after
//! aggregation, and is applied to prose only, never to code.

pub mod glyph;
pub mod prose;

pub use glyph::normalize_run;
pub use prose::{join_prose_lines, normalize_prose};
