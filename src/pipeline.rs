//! Document processing pipeline.
//!
//! Drives the full transform: per-page extraction (optionally parallel),
//! then the strictly ordered document passes — median font size, TOC
//! detection, chapter segmentation, structural merging, and block
//! classification. One call, one document, no state shared across runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use log::{debug, info};
use rayon::prelude::*;

use crate::classify::BlockClassifier;
use crate::decoder::PdfDecoder;
use crate::error::{Error, Result};
use crate::extract::{
    aggregate_lines, extract_page_images, median_font_size, merge_chapter, segment_chapters,
    TocDetector,
};
use crate::model::{DocumentModel, Page};
use crate::options::ProcessOptions;

/// Progress callback: `(current_page, total_pages)` during extraction.
/// Callbacks may borrow from the caller's stack.
pub type ProgressFn<'a> = dyn Fn(u32, u32) + Sync + 'a;

/// Cooperative cancellation flag, checked before each page.
///
/// Clone freely; all clones share the flag. A cancelled run returns
/// [`Error::Cancelled`] and publishes no partial model.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One-document processing pipeline.
pub struct Pipeline<'a, D: PdfDecoder> {
    decoder: &'a D,
    options: ProcessOptions,
    cancel: CancelToken,
}

impl<'a, D: PdfDecoder + Sync> Pipeline<'a, D> {
    /// Create a pipeline over a decoder with default options.
    pub fn new(decoder: &'a D) -> Self {
        Self {
            decoder,
            options: ProcessOptions::default(),
            cancel: CancelToken::new(),
        }
    }

    /// Replace the processing options.
    pub fn with_options(mut self, options: ProcessOptions) -> Self {
        self.options = options;
        self
    }

    /// A token that can cancel this run from another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run the full pipeline and produce the document model.
    pub fn run(&self, progress: Option<&ProgressFn<'_>>) -> Result<DocumentModel> {
        let total = self.decoder.page_count();
        if total == 0 {
            return Ok(DocumentModel {
                chapters: Vec::new(),
                toc: None,
            });
        }

        let pages = self.extract_pages(total, progress)?;
        info!("extracted {} pages", pages.len());

        let body_size = median_font_size(pages.iter().flat_map(|p| &p.lines));
        debug!("body font size: {body_size}");

        let toc_detector = TocDetector::new(&self.options, body_size);
        let (toc, toc_pages) = toc_detector.detect(&pages);

        let mut chapters = segment_chapters(&pages, &toc_pages, body_size, &self.options);

        let by_number: HashMap<u32, &Page> = pages.iter().map(|p| (p.number, p)).collect();
        for chapter in &mut chapters {
            merge_chapter(chapter, &by_number);
        }

        let page_heights: HashMap<u32, f32> =
            pages.iter().map(|p| (p.number, p.height)).collect();
        let classifier = BlockClassifier::new(&self.options, body_size, page_heights);
        for chapter in &mut chapters {
            chapter.blocks = classifier.classify(&chapter.lines);
        }

        Ok(DocumentModel { chapters, toc })
    }

    /// Extract all pages, in parallel when enabled. Results are collected
    /// and replayed in page order before any document-wide pass runs.
    fn extract_pages(&self, total: u32, progress: Option<&ProgressFn<'_>>) -> Result<Vec<Page>> {
        if self.options.parallel {
            let done = AtomicU32::new(0);
            (1..=total)
                .into_par_iter()
                .map(|number| {
                    let page = self.extract_page(number)?;
                    let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(cb) = progress {
                        cb(finished, total);
                    }
                    Ok(page)
                })
                .collect()
        } else {
            let mut pages = Vec::with_capacity(total as usize);
            for number in 1..=total {
                if let Some(cb) = progress {
                    cb(number, total);
                }
                pages.push(self.extract_page(number)?);
            }
            Ok(pages)
        }
    }

    fn extract_page(&self, number: u32) -> Result<Page> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let runs = self.decoder.page_text_runs(number)?;
        let (width, height) = self.decoder.page_dimensions(number)?;
        let lines = aggregate_lines(&runs, number);
        let images = extract_page_images(self.decoder, number, width, height, &self.options);
        let footers = self.decoder.footer_lines(number);

        Ok(Page {
            number,
            lines,
            width,
            height,
            images,
            footers,
        })
    }
}
