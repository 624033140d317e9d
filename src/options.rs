//! Processing options and heuristic thresholds.
//!
//! Every empirical constant in the pipeline is carried here rather than
//! hard-coded, so document-specific tuning stays possible. Defaults are
//! the values the heuristics were calibrated with.

/// Options for processing a document.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Extract pages in parallel (results are replayed in page order
    /// before segmentation either way).
    pub parallel: bool,

    /// Render scale for page rasterization, in pixels per page unit.
    pub image_scale: f32,

    /// Minimum crop side in raster pixels; smaller boxes are icons or
    /// rules painted as images.
    pub min_image_px: u32,

    /// Boxes covering more than this fraction of the page area are
    /// decorative backgrounds and are discarded.
    pub max_image_area_ratio: f32,

    /// CSS-equivalent units per page unit for natural display sizes.
    pub css_units_per_point: f32,

    /// Font-size ratio over body at which a line becomes a level-2
    /// heading in the block classifier.
    pub heading_h2_ratio: f32,

    /// Font-size ratio over body at which a short line becomes a level-3
    /// heading.
    pub heading_h3_ratio: f32,

    /// Maximum length for a level-3 heading line.
    pub max_heading_len: usize,

    /// Font-size ratio over body required for a chapter heading.
    pub chapter_heading_ratio: f32,

    /// Maximum length for a chapter title line.
    pub max_chapter_title_len: usize,

    /// Vertical gap, as a multiple of the larger of the last two font
    /// sizes, that breaks a paragraph within a page.
    pub gap_break_factor: f32,

    /// Inter-page gap, as a multiple of the last font size, beyond which
    /// even an open code block is flushed.
    pub page_gap_factor: f32,

    /// Share of non-trivial lines matching the TOC entry shape that marks
    /// a page as TOC on its own.
    pub toc_dense_ratio: f32,

    /// Lower entry-shape share accepted when the page also has uniformly
    /// body-sized text.
    pub toc_sparse_ratio: f32,

    /// Font-size ratio over body below which a line counts as body-sized
    /// for the sparse TOC signal.
    pub toc_small_font_ratio: f32,

    /// Required share of body-sized lines for the sparse TOC signal.
    pub toc_small_font_share: f32,

    /// Minimum non-trivial lines before the dense TOC signal applies.
    pub toc_min_lines: usize,

    /// Maximum length for a page-number-less TOC entry (section label).
    pub toc_label_max_len: usize,
}

impl ProcessOptions {
    /// Create options with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable parallel page extraction.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable parallel page extraction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the rasterization scale used for image cropping.
    pub fn with_image_scale(mut self, scale: f32) -> Self {
        self.image_scale = scale;
        self
    }

    /// Set the minimum image crop side in raster pixels.
    pub fn with_min_image_px(mut self, px: u32) -> Self {
        self.min_image_px = px;
        self
    }

    /// Set the chapter heading font-size ratio.
    pub fn with_chapter_heading_ratio(mut self, ratio: f32) -> Self {
        self.chapter_heading_ratio = ratio;
        self
    }

    /// Set the in-chapter heading ratios (level 2 and level 3).
    pub fn with_heading_ratios(mut self, h2: f32, h3: f32) -> Self {
        self.heading_h2_ratio = h2;
        self.heading_h3_ratio = h3;
        self
    }

    /// Set the paragraph-breaking vertical gap factor.
    pub fn with_gap_break_factor(mut self, factor: f32) -> Self {
        self.gap_break_factor = factor;
        self
    }
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            image_scale: 3.0,
            min_image_px: 24,
            max_image_area_ratio: 0.75,
            css_units_per_point: 96.0 / 72.0,
            heading_h2_ratio: 1.5,
            heading_h3_ratio: 1.18,
            max_heading_len: 100,
            chapter_heading_ratio: 1.28,
            max_chapter_title_len: 90,
            gap_break_factor: 2.4,
            page_gap_factor: 7.0,
            toc_dense_ratio: 0.55,
            toc_sparse_ratio: 0.40,
            toc_small_font_ratio: 1.2,
            toc_small_font_share: 0.8,
            toc_min_lines: 4,
            toc_label_max_len: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let options = ProcessOptions::new()
            .sequential()
            .with_image_scale(2.0)
            .with_heading_ratios(1.6, 1.2);

        assert!(!options.parallel);
        assert_eq!(options.image_scale, 2.0);
        assert_eq!(options.heading_h2_ratio, 1.6);
        assert_eq!(options.heading_h3_ratio, 1.2);
    }

    #[test]
    fn test_defaults() {
        let options = ProcessOptions::default();
        assert!(options.parallel);
        assert_eq!(options.chapter_heading_ratio, 1.28);
        assert_eq!(options.gap_break_factor, 2.4);
    }
}
