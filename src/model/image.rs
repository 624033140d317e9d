//! Extracted image types.

use serde::{Deserialize, Serialize};

/// Cropped RGBA8 pixel data for one extracted image.
///
/// Opaque to serialization: the presentation layer receives the handle
/// in-process and turns it into whatever its renderer needs.
#[derive(Debug, Clone, Default)]
pub struct ImageData {
    pub pixels: Vec<u8>,
}

/// An image recovered from a page's paint operations and cropped out of
/// the page raster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    /// Cropped bitmap, captured at the render scale.
    #[serde(skip)]
    pub data: ImageData,

    /// Crop width in raster pixels.
    pub width: u32,

    /// Crop height in raster pixels.
    pub height: u32,

    /// Natural display width in CSS-equivalent units, derived from the
    /// page-unit bounding box.
    pub natural_width: f32,

    /// Natural display height in CSS-equivalent units.
    pub natural_height: f32,

    /// Vertical midpoint of the page-unit bounding box, in the same
    /// coordinate space as [`TextLine::y`](super::TextLine::y). Used to
    /// interleave the image between the correct text lines.
    pub pdf_y: f32,

    /// Owning page number (1-indexed).
    pub page: u32,
}
