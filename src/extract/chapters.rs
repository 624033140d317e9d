//! Chapter segmentation.
//!
//! Splits the content-page line stream into chapters on heading lines.
//! Headings are detected by font size plus either a numbered/keyword
//! pattern or a short uppercase-starting line; the size gate applies to
//! both branches, which keeps body-sized cross-references like "see
//! Chapter 3 for details" from opening a new chapter.

use std::collections::HashSet;

use log::debug;
use regex::Regex;

use crate::model::{Chapter, Line, Page, TextLine};
use crate::options::ProcessOptions;

/// Heading detection for the segmenter.
pub struct HeadingDetector<'a> {
    options: &'a ProcessOptions,
    body_size: f32,
    keyword_re: Regex,
    numbered_re: Regex,
    roman_re: Regex,
}

impl<'a> HeadingDetector<'a> {
    pub fn new(options: &'a ProcessOptions, body_size: f32) -> Self {
        Self {
            options,
            body_size,
            keyword_re: Regex::new(r"(?i)^(?:chapter|part|section|appendix)\s+[\divx]")
                .expect("keyword regex"),
            numbered_re: Regex::new(r"^\d{1,2}[.)]\s+[A-Z]").expect("numbered regex"),
            roman_re: Regex::new(r"^[IVX]+\.\s+[A-Z]").expect("roman regex"),
        }
    }

    /// Whether a line opens a new chapter.
    pub fn is_heading(&self, line: &TextLine) -> bool {
        let text = line.trimmed();
        if text.chars().count() < 2 {
            return false;
        }
        // Size gate is mandatory on both branches.
        if line.font_size < self.body_size * self.options.chapter_heading_ratio {
            return false;
        }

        let pattern = self.keyword_re.is_match(text)
            || self.numbered_re.is_match(text)
            || self.roman_re.is_match(text);
        if pattern {
            return true;
        }

        let short = text.chars().count() < self.options.max_chapter_title_len;
        let upper = text
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || is_latin_ext_upper(c));
        short && upper
    }
}

fn is_latin_ext_upper(c: char) -> bool {
    ('\u{00C0}'..='\u{024F}').contains(&c) && c.is_uppercase()
}

/// Segment content pages into chapters.
///
/// Pages claimed by the TOC are skipped. Content before the first heading
/// becomes an implicit "Preface" chapter (index 0), dropping bare
/// page-number lines. If nothing commits — no heading anywhere, or only
/// childless headings — the whole document collapses into a single
/// "Document Content" chapter (index 1), the only chapter allowed without
/// a preceding heading.
pub fn segment_chapters(
    pages: &[Page],
    toc_pages: &HashSet<u32>,
    body_size: f32,
    options: &ProcessOptions,
) -> Vec<Chapter> {
    let detector = HeadingDetector::new(options, body_size);
    let mut chapters: Vec<Chapter> = Vec::new();
    let mut current: Option<Chapter> = None;
    let mut index = 0u32;

    let content_pages = || pages.iter().filter(|p| !toc_pages.contains(&p.number));

    for page in content_pages() {
        for line in &page.lines {
            let text = line.trimmed();
            if text.is_empty() {
                continue;
            }

            if detector.is_heading(line) {
                if let Some(ch) = current.take() {
                    if !ch.lines.is_empty() {
                        chapters.push(ch);
                    }
                }
                index += 1;
                debug!("chapter {} opens on page {}: {:?}", index, page.number, text);
                current = Some(Chapter::new(index, text, page.number));
            } else if let Some(ch) = current.as_mut() {
                ch.lines.push(Line::Text(line.clone()));
            } else if text.chars().count() > 1 && !text.chars().all(|c| c.is_ascii_digit()) {
                // Front matter before any heading; skip page-number artifacts.
                let mut preface = Chapter::new(0, "Preface", page.number);
                preface.lines.push(Line::Text(line.clone()));
                current = Some(preface);
            }
        }
    }

    if let Some(ch) = current {
        if !ch.lines.is_empty() {
            chapters.push(ch);
        }
    }

    // No chapter committed: either no heading exists, or every heading was
    // childless (a title-page run). Collapse the document into one chapter
    // rather than dropping its content.
    if chapters.is_empty() {
        let mut fallback = Chapter::new(1, "Document Content", 1);
        for page in content_pages() {
            for line in &page.lines {
                if !line.trimmed().is_empty() {
                    if fallback.lines.is_empty() {
                        fallback.page_start = line.page;
                    }
                    fallback.lines.push(Line::Text(line.clone()));
                }
            }
        }
        return vec![fallback];
    }

    chapters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, y: i32, size: f32, page: u32) -> TextLine {
        TextLine {
            y,
            text: text.into(),
            font_size: size,
            font_name: String::new(),
            page,
        }
    }

    fn page(number: u32, lines: Vec<TextLine>) -> Page {
        Page {
            number,
            lines,
            width: 612.0,
            height: 792.0,
            images: vec![],
            footers: vec![],
        }
    }

    #[test]
    fn test_cross_reference_is_not_a_heading() {
        let options = ProcessOptions::default();
        let d = HeadingDetector::new(&options, 12.0);
        // Pattern matches but the line is body-sized
        assert!(!d.is_heading(&line("see Chapter 3 for details", 500, 12.0, 1)));
        assert!(!d.is_heading(&line("Chapter 3: Growth", 500, 12.0, 1)));
    }

    #[test]
    fn test_sized_pattern_heading() {
        let options = ProcessOptions::default();
        let d = HeadingDetector::new(&options, 12.0);
        assert!(d.is_heading(&line("Chapter 3: Growth", 700, 16.0, 1)));
        assert!(d.is_heading(&line("3. Memory Management", 700, 16.0, 1)));
        assert!(d.is_heading(&line("IV. Results", 700, 16.0, 1)));
    }

    #[test]
    fn test_big_short_uppercase_heading() {
        let options = ProcessOptions::default();
        let d = HeadingDetector::new(&options, 12.0);
        assert!(d.is_heading(&line("Growing Pains", 700, 18.0, 1)));
        // Lowercase start fails the patternless branch
        assert!(!d.is_heading(&line("growing pains", 700, 18.0, 1)));
        // Too long for a title
        let long = "A".repeat(95);
        assert!(!d.is_heading(&line(&long, 700, 18.0, 1)));
    }

    #[test]
    fn test_segmentation_with_preface() {
        let options = ProcessOptions::default();
        let pages = vec![page(
            1,
            vec![
                line("12", 740, 10.0, 1),
                line("Some front matter text.", 720, 12.0, 1),
                line("Chapter 1: Beginnings", 680, 18.0, 1),
                line("It was a dark night.", 660, 12.0, 1),
            ],
        )];
        let chapters = segment_chapters(&pages, &HashSet::new(), 12.0, &options);
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].title, "Preface");
        assert_eq!(chapters[0].index, 0);
        assert_eq!(chapters[0].lines.len(), 1);
        assert_eq!(chapters[1].title, "Chapter 1: Beginnings");
        assert_eq!(chapters[1].index, 1);
    }

    #[test]
    fn test_heading_without_body_is_dropped() {
        let options = ProcessOptions::default();
        let pages = vec![page(
            1,
            vec![
                line("Chapter 1: Empty", 700, 18.0, 1),
                line("Chapter 2: Real", 660, 18.0, 1),
                line("Actual content.", 640, 12.0, 1),
            ],
        )];
        let chapters = segment_chapters(&pages, &HashSet::new(), 12.0, &options);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, "Chapter 2: Real");
        assert_eq!(chapters[0].index, 2);
    }

    #[test]
    fn test_fallback_single_chapter() {
        let options = ProcessOptions::default();
        let pages = vec![
            page(1, vec![line("plain text only", 700, 12.0, 1)]),
            page(2, vec![line("more plain text", 700, 12.0, 2)]),
        ];
        let chapters = segment_chapters(&pages, &HashSet::new(), 12.0, &options);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, "Document Content");
        assert_eq!(chapters[0].index, 1);
        assert_eq!(chapters[0].lines.len(), 2);
        // Original page order preserved
        assert_eq!(chapters[0].lines[0].page(), 1);
        assert_eq!(chapters[0].lines[1].page(), 2);
    }

    #[test]
    fn test_all_heading_document_falls_back() {
        let options = ProcessOptions::default();
        // Every non-blank line is heading-shaped, so no chapter ever gets a
        // body line; the fallback must still carry the content.
        let pages = vec![page(
            1,
            vec![
                line("The Rust Book", 700, 24.0, 1),
                line("Second Edition", 660, 18.0, 1),
            ],
        )];
        let chapters = segment_chapters(&pages, &HashSet::new(), 12.0, &options);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, "Document Content");
        assert_eq!(chapters[0].lines.len(), 2);
    }

    #[test]
    fn test_toc_pages_are_excluded() {
        let options = ProcessOptions::default();
        let pages = vec![
            page(1, vec![line("Intro ....... 1", 700, 12.0, 1)]),
            page(2, vec![line("Chapter 1: Start", 700, 18.0, 2), line("Body.", 680, 12.0, 2)]),
        ];
        let toc_pages: HashSet<u32> = [1].into_iter().collect();
        let chapters = segment_chapters(&pages, &toc_pages, 12.0, &options);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].page_start, 2);
    }
}
