//! PDF decoder abstraction layer.
//!
//! Provides a trait-based interface for the byte-stream decoder, isolating
//! the concrete PDF library from the extraction and classification logic.
//! The decoder owns fonts, encodings, and content-stream parsing; this crate
//! only consumes its positioned output.

use crate::error::Result;
use crate::model::TextLine;

/// A 2D affine transform in the standard PDF 6-value form
/// `(a, b, c, d, e, f)`, mapping `(x, y)` to
/// `(a·x + c·y + e, b·x + d·y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform(pub [f32; 6]);

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Transform = Transform([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// Compose with another transform, applying `other` first.
    ///
    /// This is the `cm` concatenation rule: painting happens in `other`'s
    /// local space, which `self` then maps onward.
    pub fn concat(&self, other: &Transform) -> Transform {
        let [a1, b1, c1, d1, e1, f1] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Transform([
            a1 * a2 + c1 * b2,
            b1 * a2 + d1 * b2,
            a1 * c2 + c1 * d2,
            b1 * c2 + d1 * d2,
            a1 * e2 + c1 * f2 + e1,
            b1 * e2 + d1 * f2 + f1,
        ])
    }

    /// Map a point through this transform.
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, c, d, e, f] = self.0;
        (a * x + c * y + e, b * x + d * y + f)
    }

    /// The vertical translation component (`f`), the text baseline Y.
    pub fn ty(&self) -> f32 {
        self.0[5]
    }

    /// The vertical scale component (`d`), a proxy for glyph height when
    /// the decoder reports none.
    pub fn vertical_scale(&self) -> f32 {
        self.0[3]
    }
}

/// A positioned run of glyphs as delivered by the decoder.
///
/// Ephemeral: consumed immediately by the line aggregator, never stored.
#[derive(Debug, Clone)]
pub struct GlyphRun {
    /// Raw (possibly garbled) text for this run.
    pub text: String,
    /// Placement of the run on the page.
    pub transform: Transform,
    /// Font resource name (e.g. "Courier-Bold"), possibly empty.
    pub font_name: String,
    /// Glyph height in page units; 0.0 when the decoder does not know.
    pub height: f32,
}

/// One operation from a page's paint-operator walk.
///
/// Only the operations that affect image placement are surfaced; the
/// decoder is free to drop everything else.
#[derive(Debug, Clone)]
pub enum PaintOp {
    /// Push the current transform onto the state stack (`q`).
    Save,
    /// Pop the state stack (`Q`).
    Restore,
    /// Concatenate a matrix onto the current transform (`cm`).
    Concat(Transform),
    /// Paint an image occupying the unit square in the current space
    /// (`Do` on an image XObject, inline `BI`, or a repeated form).
    PaintImage,
}

/// A rasterized page bitmap in RGBA8, row-major, origin top-left.
#[derive(Debug, Clone)]
pub struct RasterPage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RasterPage {
    /// Byte offset of the pixel at `(x, y)`.
    pub fn offset(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 4) as usize
    }
}

/// Abstract interface for the PDF byte-stream decoder.
///
/// Implementations supply positioned text runs, page geometry, the paint
/// operations needed for image recovery, page rasterization, and the lines
/// falling in the bottom margin band.
pub trait PdfDecoder {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// All positioned text runs for a page, in content-stream order.
    fn page_text_runs(&self, page: u32) -> Result<Vec<GlyphRun>>;

    /// Page width and height in page units.
    fn page_dimensions(&self, page: u32) -> Result<(f32, f32)>;

    /// The page's paint operations. Decoders that cannot walk operators
    /// for a page return an empty list rather than failing.
    fn page_paint_ops(&self, page: u32) -> Vec<PaintOp>;

    /// Rasterize a full page at `scale` pixels per page unit.
    fn rasterize_page(&self, page: u32, scale: f32) -> Result<RasterPage>;

    /// Lines lying in the decoder-defined bottom margin band, already
    /// aggregated, top to bottom.
    fn footer_lines(&self, page: u32) -> Vec<TextLine>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_apply() {
        let (x, y) = Transform::IDENTITY.apply(3.5, -2.0);
        assert_eq!((x, y), (3.5, -2.0));
    }

    #[test]
    fn test_concat_translation_then_scale() {
        // Scale applied after a local translation: point (1, 1) in the
        // translated space lands at ((1+10)*2, (1+5)*2).
        let scale = Transform([2.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
        let translate = Transform([1.0, 0.0, 0.0, 1.0, 10.0, 5.0]);
        let ctm = scale.concat(&translate);
        assert_eq!(ctm.apply(1.0, 1.0), (22.0, 12.0));
    }

    #[test]
    fn test_concat_rotation() {
        // 90° rotation: unit X axis maps to unit Y axis.
        let rot = Transform([0.0, 1.0, -1.0, 0.0, 0.0, 0.0]);
        let ctm = Transform::IDENTITY.concat(&rot);
        let (x, y) = ctm.apply(1.0, 0.0);
        assert!((x - 0.0).abs() < 1e-6);
        assert!((y - 1.0).abs() < 1e-6);
    }
}
