//! Image recovery from paint operations.
//!
//! Replays a page's transform stack to find where each painted image lands
//! in page space, then crops the region out of a rasterized page bitmap.
//! An image paint covers the unit square in its local space; mapping the
//! four corners through the current transform and taking the axis-aligned
//! bounding box bounds rotated and sheared placements correctly.

use log::{debug, warn};

use crate::decoder::{PaintOp, PdfDecoder, RasterPage, Transform};
use crate::model::{Image, ImageData};
use crate::options::ProcessOptions;

/// An axis-aligned box in page units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl PageBox {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn mid_y(&self) -> f32 {
        (self.min_y + self.max_y) / 2.0
    }
}

/// Map the unit square through a transform and take its bounding box.
pub fn unit_square_bbox(ctm: &Transform) -> PageBox {
    let corners = [
        ctm.apply(0.0, 0.0),
        ctm.apply(1.0, 0.0),
        ctm.apply(0.0, 1.0),
        ctm.apply(1.0, 1.0),
    ];
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for (x, y) in corners {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    PageBox {
        min_x,
        min_y,
        max_x,
        max_y,
    }
}

/// Walk a page's paint operations and return the page-unit box of every
/// painted image, in paint order.
pub fn collect_image_boxes(ops: &[PaintOp]) -> Vec<PageBox> {
    let mut ctm = Transform::IDENTITY;
    let mut stack: Vec<Transform> = Vec::new();
    let mut boxes = Vec::new();

    for op in ops {
        match op {
            PaintOp::Save => stack.push(ctm),
            PaintOp::Restore => {
                // Unbalanced restores appear in malformed streams; keep the
                // current transform rather than failing.
                if let Some(prev) = stack.pop() {
                    ctm = prev;
                }
            }
            PaintOp::Concat(m) => ctm = ctm.concat(m),
            PaintOp::PaintImage => boxes.push(unit_square_bbox(&ctm)),
        }
    }
    boxes
}

/// Extract all images for one page.
///
/// Full-page backgrounds (area above the configured page-area ratio) and
/// sub-threshold crops (icons, rules) are discarded. The page is
/// rasterized at most once, and only if at least one box survives the
/// area filter. Rasterization failure degrades to an empty result.
pub fn extract_page_images<D: PdfDecoder + ?Sized>(
    decoder: &D,
    page: u32,
    page_width: f32,
    page_height: f32,
    options: &ProcessOptions,
) -> Vec<Image> {
    let ops = decoder.page_paint_ops(page);
    if !ops.iter().any(|op| matches!(op, PaintOp::PaintImage)) {
        return Vec::new();
    }

    let page_area = page_width * page_height;
    let boxes: Vec<PageBox> = collect_image_boxes(&ops)
        .into_iter()
        .filter(|b| b.area() <= page_area * options.max_image_area_ratio)
        .collect();
    if boxes.is_empty() {
        return Vec::new();
    }

    let scale = options.image_scale;
    let raster = match decoder.rasterize_page(page, scale) {
        Ok(r) => r,
        Err(e) => {
            warn!("page {page} rasterization failed, dropping images: {e}");
            return Vec::new();
        }
    };

    let mut images = Vec::new();
    for b in boxes {
        // Raster origin is top-left, page origin bottom-left: flip Y.
        let px = (b.min_x * scale).floor().max(0.0) as u32;
        let py = ((page_height - b.max_y) * scale).floor().max(0.0) as u32;
        let pw = (b.width() * scale).round() as u32;
        let ph = (b.height() * scale).round() as u32;

        let pw = pw.min(raster.width.saturating_sub(px));
        let ph = ph.min(raster.height.saturating_sub(py));
        if pw < options.min_image_px || ph < options.min_image_px {
            debug!("page {page}: dropping {pw}x{ph}px crop below threshold");
            continue;
        }

        images.push(Image {
            data: crop(&raster, px, py, pw, ph),
            width: pw,
            height: ph,
            natural_width: b.width() * options.css_units_per_point,
            natural_height: b.height() * options.css_units_per_point,
            pdf_y: b.mid_y(),
            page,
        });
    }
    images
}

/// Copy a pixel region out of a page raster.
fn crop(raster: &RasterPage, x: u32, y: u32, w: u32, h: u32) -> ImageData {
    let mut pixels = Vec::with_capacity((w * h * 4) as usize);
    for row in y..y + h {
        let start = raster.offset(x, row);
        let end = start + (w * 4) as usize;
        if end <= raster.pixels.len() {
            pixels.extend_from_slice(&raster.pixels[start..end]);
        }
    }
    ImageData { pixels }
}
