//! Structural merging of images and page breaks into chapter streams.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use crate::model::{Chapter, Line, Page, PageBreakLine};

/// Interleave a chapter's images and page boundaries into its line stream.
///
/// Every image on a page the chapter spans is injected at its vertical
/// midpoint, then the stream is re-sorted by (page ascending, Y
/// descending) so images land between the correct surrounding text lines.
/// A second pass inserts a page-break marker wherever the page number
/// changes, carrying the departed page's footer text.
pub fn merge_chapter(chapter: &mut Chapter, pages: &HashMap<u32, &Page>) {
    let spanned: BTreeSet<u32> = chapter.lines.iter().map(|l| l.page()).collect();

    for page_num in &spanned {
        if let Some(page) = pages.get(page_num) {
            for image in &page.images {
                chapter.lines.push(Line::Image(image.clone()));
            }
        }
    }

    // Stable sort keeps first-seen order for equal (page, Y) pairs.
    chapter.lines.sort_by(|a, b| {
        a.page().cmp(&b.page()).then_with(|| {
            b.y().partial_cmp(&a.y()).unwrap_or(Ordering::Equal)
        })
    });

    let mut merged: Vec<Line> = Vec::with_capacity(chapter.lines.len());
    let mut last_page: Option<u32> = None;
    for line in chapter.lines.drain(..) {
        if let Some(prev) = last_page {
            if line.page() != prev {
                let footer = pages.get(&prev).and_then(|p| p.footer_text());
                merged.push(Line::PageBreak(PageBreakLine { page: prev, footer }));
            }
        }
        last_page = Some(line.page());
        merged.push(line);
    }
    chapter.lines = merged;
}
