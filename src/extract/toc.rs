//! TOC page classification and table-of-contents extraction.
//!
//! A page is wholly TOC or wholly content, never mixed. Multi-page tables
//! of contents are supported as an unbroken run of matching pages starting
//! at the first match; the first page that fails all signals ends the run
//! for good.

use std::collections::HashSet;

use log::debug;
use regex::Regex;

use crate::model::{Page, Toc, TocEntry};
use crate::options::ProcessOptions;

/// Classifies pages as TOC or content and extracts entries.
pub struct TocDetector<'a> {
    options: &'a ProcessOptions,
    body_size: f32,
    header_re: Regex,
    entry_re: Regex,
    number_prefix_re: Regex,
}

impl<'a> TocDetector<'a> {
    /// Create a detector for one document.
    pub fn new(options: &'a ProcessOptions, body_size: f32) -> Self {
        Self {
            options,
            body_size,
            header_re: Regex::new(r"(?i)^(?:table\s+of\s+contents|contents)$")
                .expect("header regex"),
            // Text, then a dot leader (two or more periods, possibly
            // spaced) or a tab run, then a trailing page number.
            entry_re: Regex::new(r"^(?P<text>.+?)\s*(?:(?:\.\s*){2,}|\t+)\s*(?P<page>\d{1,4})\s*$")
                .expect("entry regex"),
            number_prefix_re: Regex::new(r"^(\d+(?:\.\d+)*)").expect("prefix regex"),
        }
    }

    /// Walk all pages, returning the assembled TOC (if any) and the set of
    /// page numbers it claimed.
    pub fn detect(&self, pages: &[Page]) -> (Option<Toc>, HashSet<u32>) {
        let mut claimed = HashSet::new();
        let mut entries = Vec::new();
        let mut title: Option<String> = None;
        let mut inside = false;

        for page in pages {
            if self.is_toc_page(page) {
                inside = true;
                claimed.insert(page.number);
                debug!("page {} classified as TOC", page.number);
                if title.is_none() {
                    title = self.header_text(page);
                }
                entries.extend(self.extract_entries(page));
            } else if inside {
                // The unbroken run has ended; later lookalikes are content.
                break;
            }
        }

        if claimed.is_empty() {
            return (None, claimed);
        }
        let toc = Toc {
            title: title.unwrap_or_else(|| "Contents".to_string()),
            entries,
        };
        (Some(toc), claimed)
    }

    /// Evaluate the three classification signals; any one suffices.
    pub fn is_toc_page(&self, page: &Page) -> bool {
        let nontrivial: Vec<&str> = page
            .lines
            .iter()
            .filter(|l| !l.is_trivial())
            .map(|l| l.trimmed())
            .collect();
        if nontrivial.is_empty() {
            return false;
        }

        // (a) A bare "Table of Contents" / "Contents" header up front.
        if self.header_re.is_match(nontrivial[0]) {
            return true;
        }

        let matches = nontrivial
            .iter()
            .filter(|t| self.entry_re.is_match(t))
            .count();
        let ratio = matches as f32 / nontrivial.len() as f32;

        // (b) A dense listing.
        if nontrivial.len() >= self.options.toc_min_lines && ratio >= self.options.toc_dense_ratio {
            return true;
        }

        // (c) A sparser listing, but uniformly body-sized text — rules out
        // a content page opening with big chapter headings.
        if ratio >= self.options.toc_sparse_ratio {
            let sized: Vec<f32> = page
                .lines
                .iter()
                .filter(|l| l.font_size > 0.0)
                .map(|l| l.font_size)
                .collect();
            if !sized.is_empty() {
                let cutoff = self.body_size * self.options.toc_small_font_ratio;
                let small = sized.iter().filter(|&&s| s <= cutoff).count();
                if small as f32 / sized.len() as f32 >= self.options.toc_small_font_share {
                    return true;
                }
            }
        }

        false
    }

    /// Entries from one matching page, in reading order.
    fn extract_entries(&self, page: &Page) -> Vec<TocEntry> {
        let mut entries = Vec::new();
        for line in page.lines.iter().filter(|l| !l.is_trivial()) {
            let text = line.trimmed();
            if self.header_re.is_match(text) {
                continue;
            }

            if let Some(caps) = self.entry_re.captures(text) {
                let entry_text = caps["text"].trim().to_string();
                let page_num = caps["page"].parse::<u32>().ok();
                let level = self.indent_level(&entry_text);
                entries.push(TocEntry::new(entry_text, page_num, level));
            } else if text.chars().count() < self.options.toc_label_max_len {
                // Section label without a page number
                entries.push(TocEntry::new(text, None, self.indent_level(text)));
            }
        }
        entries
    }

    /// Indent level from a leading "N.N.N" numbering: one level per dot,
    /// clamped to 2.
    fn indent_level(&self, text: &str) -> u8 {
        self.number_prefix_re
            .captures(text)
            .map(|caps| caps[1].matches('.').count().min(2) as u8)
            .unwrap_or(0)
    }

    /// The printed header of a matching page, if present.
    fn header_text(&self, page: &Page) -> Option<String> {
        page.lines
            .iter()
            .filter(|l| !l.is_trivial())
            .map(|l| l.trimmed())
            .find(|t| self.header_re.is_match(t))
            .map(|t| t.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextLine;

    fn line(text: &str, y: i32, size: f32) -> TextLine {
        TextLine {
            y,
            text: text.into(),
            font_size: size,
            font_name: String::new(),
            page: 1,
        }
    }

    fn page(lines: Vec<TextLine>) -> Page {
        Page {
            number: 1,
            lines,
            width: 612.0,
            height: 792.0,
            images: vec![],
            footers: vec![],
        }
    }

    fn detector(options: &ProcessOptions) -> TocDetector<'_> {
        TocDetector::new(options, 12.0)
    }

    #[test]
    fn test_header_signal() {
        let options = ProcessOptions::default();
        let d = detector(&options);
        let p = page(vec![
            line("Table of Contents", 700, 18.0),
            line("anything at all here", 680, 12.0),
        ]);
        assert!(d.is_toc_page(&p));
    }

    #[test]
    fn test_dense_signal() {
        let options = ProcessOptions::default();
        let d = detector(&options);
        // 3 of 5 non-trivial lines match the entry shape (60%)
        let p = page(vec![
            line("Preface", 700, 12.0),
            line("Introduction ......... 1", 680, 12.0),
            line("Getting Started ...... 9", 660, 12.0),
            line("Advanced Topics ..... 42", 640, 12.0),
            line("Colophon", 620, 12.0),
        ]);
        assert!(d.is_toc_page(&p));
    }

    #[test]
    fn test_sparse_page_rejected() {
        let options = ProcessOptions::default();
        let d = detector(&options);
        // 2 matches out of 10 (20%) is not a TOC
        let mut lines = vec![
            line("Overview ............ 3", 700, 12.0),
            line("Details ............ 17", 690, 12.0),
        ];
        for i in 0..8 {
            lines.push(line("Ordinary prose sentence here.", 680 - i * 10, 12.0));
        }
        assert!(!d.is_toc_page(&page(lines)));
    }

    #[test]
    fn test_entry_extraction_with_levels() {
        let options = ProcessOptions::default();
        let d = detector(&options);
        let p = page(vec![
            line("Contents", 700, 18.0),
            line("1 Introduction ......... 1", 680, 12.0),
            line("1.1 Background ......... 2", 660, 12.0),
            line("1.1.1 History .......... 3", 640, 12.0),
            line("Part One", 620, 12.0),
        ]);
        let (toc, claimed) = d.detect(std::slice::from_ref(&p));
        let toc = toc.unwrap();
        assert!(claimed.contains(&1));
        assert_eq!(toc.title, "Contents");
        assert_eq!(toc.entries.len(), 4);
        assert_eq!(toc.entries[0].level, 0);
        assert_eq!(toc.entries[1].level, 1);
        assert_eq!(toc.entries[2].level, 2);
        assert_eq!(toc.entries[0].page, Some(1));
        // Section label keeps no page number
        assert_eq!(toc.entries[3].page, None);
    }

    #[test]
    fn test_tab_leader() {
        let options = ProcessOptions::default();
        let d = detector(&options);
        let p = page(vec![
            line("Contents", 700, 14.0),
            line("Chapter One\t5", 680, 12.0),
        ]);
        let (toc, _) = d.detect(std::slice::from_ref(&p));
        let entries = toc.unwrap().entries;
        assert_eq!(entries[0].text, "Chapter One");
        assert_eq!(entries[0].page, Some(5));
    }

    #[test]
    fn test_run_ends_at_first_content_page() {
        let options = ProcessOptions::default();
        let d = detector(&options);
        let toc1 = page(vec![
            line("Contents", 700, 14.0),
            line("One ......... 1", 680, 12.0),
        ]);
        let mut content = page(vec![line("Body prose with no leaders.", 700, 12.0)]);
        content.number = 2;
        let mut lookalike = page(vec![
            line("Contents", 700, 14.0),
            line("Two ......... 2", 680, 12.0),
        ]);
        lookalike.number = 3;

        let (_, claimed) = d.detect(&[toc1, content, lookalike]);
        assert!(claimed.contains(&1));
        assert!(!claimed.contains(&3));
    }
}
