//! Streaming block classification.
//!
//! Converts a chapter's merged line stream into typed content blocks.
//! The classifier is stateful: four accumulation buffers (paragraph, code,
//! TOC candidate, reference candidate) of which at most one is open at a
//! time; signals on each incoming line decide which buffer absorbs it and
//! which buffers must flush first.

pub mod language;

use std::collections::HashMap;

use regex::Regex;

use crate::model::{Block, Line, PageBreakLine, TextLine, TocEntry};
use crate::normalize::{join_prose_lines, normalize_prose};
use crate::options::ProcessOptions;
use language::detect_language;

/// Classifies one chapter's merged line stream into blocks.
pub struct BlockClassifier<'a> {
    options: &'a ProcessOptions,
    body_size: f32,
    /// Page heights, needed to measure vertical gaps across page breaks.
    page_heights: HashMap<u32, f32>,
    mono_font_re: Regex,
    code_keyword_re: Regex,
    code_operator_re: Regex,
    code_comment_re: Regex,
    eq_suffix_re: Regex,
    ref_bracket_re: Regex,
    ref_numbered_re: Regex,
    ref_doi_re: Regex,
    toc_entry_re: Regex,
}

/// Running accumulator state for one classification pass.
#[derive(Default)]
struct ClassifierState {
    blocks: Vec<Block>,
    para: Vec<String>,
    code: Vec<String>,
    code_depth: i32,
    toc_buf: Vec<(String, TocEntry)>,
    ref_buf: Vec<String>,
    /// Page breaks absorbed into an open code block, emitted after it in
    /// order. A code block can cross more than one boundary.
    pending_breaks: Vec<PageBreakLine>,
    last_y: Option<f32>,
    last_page: Option<u32>,
    last_fs: f32,
    prev_fs: f32,
}

impl<'a> BlockClassifier<'a> {
    pub fn new(
        options: &'a ProcessOptions,
        body_size: f32,
        page_heights: HashMap<u32, f32>,
    ) -> Self {
        Self {
            options,
            body_size,
            page_heights,
            mono_font_re: Regex::new(
                r"(?i)courier|mono|code|consol|inconsolata|fira.?code|source.?code|menlo|monaco|hack",
            )
            .expect("mono font regex"),
            code_keyword_re: Regex::new(
                r"^\s*(function|def |class |import |from |const |let |var |return |public |private |void |int |string |bool |if\s*\(|for\s*\(|while\s*\(|#include|package |fn )",
            )
            .expect("code keyword regex"),
            code_operator_re: Regex::new(r"=>|->|!=|===|&&|\|\|").expect("code operator regex"),
            code_comment_re: Regex::new(r"^\s*(//|#\s?\w)").expect("code comment regex"),
            eq_suffix_re: Regex::new(r"(?i)(\(\d{1,3}\)|\[\s*eq\.?\s*\d+\s*\])\s*$")
                .expect("equation suffix regex"),
            ref_bracket_re: Regex::new(r"^\[\d{1,3}\]\s").expect("ref bracket regex"),
            ref_numbered_re: Regex::new(r"^\d{1,3}\.\s+[A-Z]").expect("ref numbered regex"),
            ref_doi_re: Regex::new(r"(?i)\bdoi:\s*10\.\d{4,}|\b10\.\d{4,9}/\S+")
                .expect("ref doi regex"),
            toc_entry_re: Regex::new(
                r"^(?P<text>.+?)\s*(?:(?:\.\s*){2,}|\t+)\s*(?P<page>\d{1,4})\s*$",
            )
            .expect("toc entry regex"),
        }
    }

    /// Classify a merged line stream into an ordered block list.
    pub fn classify(&self, lines: &[Line]) -> Vec<Block> {
        let mut state = ClassifierState::default();

        for line in lines {
            match line {
                Line::Text(t) => self.on_text_line(&mut state, t),
                Line::Image(image) => {
                    self.flush_all(&mut state);
                    state.blocks.push(Block::Image {
                        image: image.clone(),
                    });
                    state.last_y = None;
                }
                Line::PageBreak(b) => self.on_page_break(&mut state, b),
            }
        }

        self.flush_all(&mut state);
        state.blocks
    }

    // ----- line handling ---------------------------------------------------

    fn on_page_break(&self, state: &mut ClassifierState, b: &PageBreakLine) {
        // A code block with unclosed delimiters commonly spans the page
        // boundary (e.g. a multi-line function body). Defer the break and
        // keep accumulating; the break block is emitted right after the
        // code block it interrupted.
        if !state.code.is_empty() && state.code_depth > 0 {
            state.pending_breaks.push(b.clone());
            return;
        }
        self.flush_all(state);
        state.blocks.push(Block::PageBreak {
            page: b.page,
            footer: b.footer.clone(),
        });
        state.last_y = None;
    }

    fn on_text_line(&self, state: &mut ClassifierState, t: &TextLine) {
        let raw = t.text.as_str();
        let text = raw.trim();
        if text.is_empty() {
            self.flush_all(state);
            state.last_y = None;
            return;
        }

        let fs = if t.font_size > 0.0 {
            t.font_size
        } else {
            self.body_size
        };

        self.apply_break_rules(state, t, fs);

        let ratio = fs / self.body_size;
        let len = text.chars().count();

        if ratio >= self.options.heading_h2_ratio {
            self.flush_all(state);
            state.blocks.push(Block::Heading {
                level: 2,
                text: text.to_string(),
            });
        } else if ratio >= self.options.heading_h3_ratio && len < self.options.max_heading_len {
            self.flush_all(state);
            state.blocks.push(Block::Heading {
                level: 3,
                text: text.to_string(),
            });
        } else if !state.code.is_empty() && state.code_depth > 0 {
            // Inside unclosed delimiters any line continues the code block,
            // even prose-looking ones (multi-line strings, wrapped args).
            self.push_code_line(state, raw);
        } else if self.is_code_line(t, raw) {
            self.flush_para(state);
            self.flush_toc(state);
            self.flush_refs(state);
            self.push_code_line(state, raw);
        } else if let Some((expr, label)) = self.as_equation(text, len) {
            self.flush_all(state);
            state.blocks.push(Block::Equation { expr, label });
        } else if self.is_reference_entry(text) {
            // Settle first so a downgraded inline span joins the paragraph
            // before it flushes.
            self.settle_code(state);
            self.flush_para(state);
            self.flush_toc(state);
            state.ref_buf.push(text.to_string());
        } else if let Some(entry) = self.as_toc_entry(text) {
            self.settle_code(state);
            self.flush_para(state);
            self.flush_refs(state);
            state.toc_buf.push((text.to_string(), entry));
        } else {
            self.flush_toc(state);
            self.flush_refs(state);
            self.settle_code(state);
            state.para.push(text.to_string());
        }

        state.last_y = Some(t.y as f32);
        state.last_page = Some(t.page);
        state.prev_fs = state.last_fs;
        state.last_fs = fs;
    }

    /// Paragraph/page break detection from geometry, before classification.
    fn apply_break_rules(&self, state: &mut ClassifierState, t: &TextLine, fs: f32) {
        let page_changed = state.last_page.is_some_and(|p| p != t.page);
        let code_open = !state.code.is_empty() && state.code_depth > 0;

        if page_changed {
            if code_open {
                // Physical reading distance across the boundary: rest of
                // the old page plus the offset into the new one.
                let old_remainder = state.last_y.unwrap_or(0.0).max(0.0);
                let new_height = self
                    .page_heights
                    .get(&t.page)
                    .copied()
                    .unwrap_or(0.0);
                let gap = old_remainder + (new_height - t.y as f32).max(0.0);
                let limit = self.options.page_gap_factor * state.last_fs.max(fs);
                if gap > limit {
                    self.flush_all(state);
                }
            } else {
                self.flush_all(state);
            }
        } else if let Some(last_y) = state.last_y {
            let gap = last_y - t.y as f32;
            let reference = if state.last_fs > 0.0 {
                state.last_fs.max(state.prev_fs)
            } else {
                fs
            };
            if gap > self.options.gap_break_factor * reference && !code_open {
                self.flush_all(state);
            }
        }
    }

    // ----- signals ---------------------------------------------------------

    fn is_code_line(&self, t: &TextLine, raw: &str) -> bool {
        if self.mono_font_re.is_match(&t.font_name) {
            return true;
        }
        looks_like_code(raw)
            || self.code_keyword_re.is_match(raw)
            || self.code_operator_re.is_match(raw)
            || self.code_comment_re.is_match(raw)
    }

    /// Standalone display equation: either a clear equation-number suffix
    /// on a shortish line, or a short line dense in math characters.
    fn as_equation(&self, text: &str, len: usize) -> Option<(String, Option<String>)> {
        let density = math_density(text);
        if let Some(m) = self.eq_suffix_re.find(text) {
            if len < 200 && density >= 0.05 {
                let expr = text[..m.start()].trim().to_string();
                let label = Some(m.as_str().trim().to_string());
                return Some((expr, label));
            }
        }
        if density >= 0.3 && len < 80 {
            return Some((text.to_string(), None));
        }
        None
    }

    fn is_reference_entry(&self, text: &str) -> bool {
        self.ref_bracket_re.is_match(text)
            || self.ref_numbered_re.is_match(text)
            || self.ref_doi_re.is_match(text)
    }

    fn as_toc_entry(&self, text: &str) -> Option<TocEntry> {
        let caps = self.toc_entry_re.captures(text)?;
        let entry_text = caps["text"].trim().to_string();
        let page = caps["page"].parse::<u32>().ok();
        Some(TocEntry::new(entry_text, page, 0))
    }

    // ----- buffers ---------------------------------------------------------

    fn push_code_line(&self, state: &mut ClassifierState, raw: &str) {
        state.code_depth = update_delimiter_depth(state.code_depth, raw);
        state.code.push(raw.trim_end().to_string());
    }

    /// Resolve the code buffer when a competing buffer needs to open:
    /// two or more lines commit as a code block, a single stray line
    /// downgrades to an inline code span in the paragraph.
    fn settle_code(&self, state: &mut ClassifierState) {
        match state.code.len() {
            0 => {}
            1 => {
                let inline = state.code.pop().unwrap_or_default();
                state.para.push(format!("`{}`", inline.trim()));
                state.code_depth = 0;
            }
            _ => self.flush_code(state),
        }
    }

    fn flush_code(&self, state: &mut ClassifierState) {
        if !state.code.is_empty() {
            let lines = std::mem::take(&mut state.code);
            let language = detect_language(&lines).to_string();
            state.blocks.push(Block::Code { lines, language });
            for b in state.pending_breaks.drain(..) {
                state.blocks.push(Block::PageBreak {
                    page: b.page,
                    footer: b.footer,
                });
            }
        }
        state.code_depth = 0;
    }

    fn flush_para(&self, state: &mut ClassifierState) {
        if state.para.is_empty() {
            return;
        }
        let lines = std::mem::take(&mut state.para);
        let text = normalize_prose(&join_prose_lines(&lines));
        if !text.is_empty() {
            state.blocks.push(Block::Paragraph { text });
        }
    }

    /// A lone leader-shaped line is a coincidence, not a section TOC.
    fn flush_toc(&self, state: &mut ClassifierState) {
        if state.toc_buf.is_empty() {
            return;
        }
        let buf = std::mem::take(&mut state.toc_buf);
        if buf.len() >= 2 {
            state.blocks.push(Block::SectionToc {
                entries: buf.into_iter().map(|(_, e)| e).collect(),
            });
        } else {
            for (raw, _) in buf {
                state.para.push(raw);
            }
        }
    }

    fn flush_refs(&self, state: &mut ClassifierState) {
        if !state.ref_buf.is_empty() {
            state.blocks.push(Block::References {
                entries: std::mem::take(&mut state.ref_buf),
            });
        }
    }

    fn flush_all(&self, state: &mut ClassifierState) {
        // Downgrades feed the paragraph buffer, so it flushes last.
        self.settle_code(state);
        self.flush_toc(state);
        self.flush_refs(state);
        self.flush_para(state);
        for b in state.pending_breaks.drain(..) {
            state.blocks.push(Block::PageBreak {
                page: b.page,
                footer: b.footer,
            });
        }
    }
}

// ----- free helpers --------------------------------------------------------

/// Textual code signals that need no regex: deep indentation or a trailing
/// brace/semicolon.
fn looks_like_code(raw: &str) -> bool {
    let indented = raw.len() >= raw.trim_start().len() + 4 && !raw.trim_start().is_empty();
    let trimmed = raw.trim_end();
    indented || trimmed.ends_with('{') || trimmed.ends_with('}') || trimmed.ends_with(';')
}

/// Share of mathematical codepoints among the non-space characters.
fn math_density(text: &str) -> f32 {
    let mut math = 0usize;
    let mut total = 0usize;
    for c in text.chars() {
        if c.is_whitespace() {
            continue;
        }
        total += 1;
        if is_math_char(c) {
            math += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        math as f32 / total as f32
    }
}

fn is_math_char(c: char) -> bool {
    matches!(c,
        '\u{0370}'..='\u{03FF}' // Greek
        | '\u{2070}'..='\u{209F}' // superscripts and subscripts
        | '\u{2190}'..='\u{21FF}' // arrows
        | '\u{2200}'..='\u{22FF}' // mathematical operators
        | '\u{27C0}'..='\u{27EF}' // misc mathematical symbols-A
        | '=' | '+' | '±' | '×' | '÷' | '^' | '°'
        | '\u{00B9}' | '\u{00B2}' | '\u{00B3}' // ¹ ² ³
    )
}

/// Advance the running unclosed-delimiter depth across one code line.
///
/// Brackets inside quoted string spans are skipped; the running value is
/// clamped at zero so stray closers never push it negative.
fn update_delimiter_depth(mut depth: i32, line: &str) -> i32 {
    let mut in_string: Option<char> = None;
    let mut escaped = false;

    for c in line.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match in_string {
            Some(quote) => match c {
                '\\' => escaped = true,
                _ if c == quote => in_string = None,
                _ => {}
            },
            None => match c {
                '"' | '\'' => in_string = Some(c),
                '{' | '(' | '[' => depth += 1,
                '}' | ')' | ']' => depth = (depth - 1).max(0),
                _ => {}
            },
        }
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ProcessOptions {
        ProcessOptions::default()
    }

    fn classifier(opts: &ProcessOptions) -> BlockClassifier<'_> {
        let heights: HashMap<u32, f32> = [(1, 792.0), (2, 792.0)].into_iter().collect();
        BlockClassifier::new(opts, 12.0, heights)
    }

    fn text(s: &str, y: i32, size: f32, page: u32) -> Line {
        Line::Text(TextLine {
            y,
            text: s.into(),
            font_size: size,
            font_name: String::new(),
            page,
        })
    }

    fn mono(s: &str, y: i32, page: u32) -> Line {
        Line::Text(TextLine {
            y,
            text: s.into(),
            font_size: 10.0,
            font_name: "Courier-New".into(),
            page,
        })
    }

    #[test]
    fn test_three_code_lines_one_block() {
        let opts = options();
        let c = classifier(&opts);
        let lines = vec![
            text("int a = 1;", 700, 10.0, 1),
            text("int b = 2;", 685, 10.0, 1),
            text("int c = a + b;", 670, 10.0, 1),
        ];
        let blocks = c.classify(&lines);
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Code { lines, .. } => assert_eq!(lines.len(), 3),
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn test_single_code_line_downgrades_inline() {
        let opts = options();
        let c = classifier(&opts);
        let lines = vec![
            text("let x = compute();", 700, 12.0, 1),
            text("and then the prose continues on.", 685, 12.0, 1),
        ];
        let blocks = c.classify(&lines);
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Paragraph { text } => {
                assert!(text.starts_with("`let x = compute();`"));
                assert!(text.contains("prose continues"));
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn test_heading_levels() {
        let opts = options();
        let c = classifier(&opts);
        let lines = vec![
            text("Big Section", 700, 20.0, 1),
            text("Smaller Subsection", 660, 15.0, 1),
            text("Ordinary paragraph text here.", 640, 12.0, 1),
        ];
        let blocks = c.classify(&lines);
        assert_eq!(blocks.len(), 3);
        assert!(matches!(&blocks[0], Block::Heading { level: 2, .. }));
        assert!(matches!(&blocks[1], Block::Heading { level: 3, .. }));
        assert!(matches!(&blocks[2], Block::Paragraph { .. }));
    }

    #[test]
    fn test_open_delimiters_absorb_prose_lines() {
        let opts = options();
        let c = classifier(&opts);
        let lines = vec![
            mono("let msg = format!(", 700, 1),
            text("a plain looking continuation line", 685, 10.0, 1),
            mono(");", 670, 1),
            text("", 655, 0.0, 1),
        ];
        let blocks = c.classify(&lines);
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Code { lines, .. } => assert_eq!(lines.len(), 3),
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn test_page_break_deferred_inside_open_code() {
        let opts = options();
        let c = classifier(&opts);
        let lines = vec![
            mono("fn main() {", 30, 1),
            Line::PageBreak(PageBreakLine {
                page: 1,
                footer: None,
            }),
            mono("    body();", 770, 2),
            mono("}", 755, 2),
            text("After the code.", 730, 12.0, 2),
        ];
        let blocks = c.classify(&lines);
        assert_eq!(blocks.len(), 3);
        assert!(matches!(&blocks[0], Block::Code { lines, .. } if lines.len() == 3));
        assert!(matches!(&blocks[1], Block::PageBreak { page: 1, .. }));
        assert!(matches!(&blocks[2], Block::Paragraph { .. }));
    }

    #[test]
    fn test_code_spanning_two_page_breaks_keeps_both() {
        let opts = options();
        let heights: HashMap<u32, f32> =
            [(1, 792.0), (2, 792.0), (3, 792.0)].into_iter().collect();
        let c = BlockClassifier::new(&opts, 12.0, heights);
        let lines = vec![
            mono("fn main() {", 30, 1),
            Line::PageBreak(PageBreakLine {
                page: 1,
                footer: Some("p1".into()),
            }),
            mono("    alpha();", 770, 2),
            mono("    beta();", 30, 2),
            Line::PageBreak(PageBreakLine {
                page: 2,
                footer: Some("p2".into()),
            }),
            mono("}", 770, 3),
            text("After.", 740, 12.0, 3),
        ];
        let blocks = c.classify(&lines);
        assert_eq!(blocks.len(), 4);
        assert!(matches!(&blocks[0], Block::Code { lines, .. } if lines.len() == 4));
        // Both deferred breaks survive, in boundary order
        assert!(
            matches!(&blocks[1], Block::PageBreak { page: 1, footer } if footer.as_deref() == Some("p1"))
        );
        assert!(
            matches!(&blocks[2], Block::PageBreak { page: 2, footer } if footer.as_deref() == Some("p2"))
        );
        assert!(matches!(&blocks[3], Block::Paragraph { .. }));
    }

    #[test]
    fn test_page_break_flushes_closed_buffers() {
        let opts = options();
        let c = classifier(&opts);
        let lines = vec![
            text("A paragraph ends here.", 80, 12.0, 1),
            Line::PageBreak(PageBreakLine {
                page: 1,
                footer: Some("Footer 1".into()),
            }),
            text("A new paragraph begins.", 760, 12.0, 2),
        ];
        let blocks = c.classify(&lines);
        assert_eq!(blocks.len(), 3);
        assert!(matches!(&blocks[0], Block::Paragraph { .. }));
        match &blocks[1] {
            Block::PageBreak { page, footer } => {
                assert_eq!(*page, 1);
                assert_eq!(footer.as_deref(), Some("Footer 1"));
            }
            other => panic!("expected page break, got {other:?}"),
        }
    }

    #[test]
    fn test_vertical_gap_breaks_paragraph() {
        let opts = options();
        let c = classifier(&opts);
        let lines = vec![
            text("First thought.", 700, 12.0, 1),
            // 100 units down: beyond 2.4 × 12
            text("Second thought, far below.", 600, 12.0, 1),
        ];
        let blocks = c.classify(&lines);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_small_gap_keeps_paragraph_together() {
        let opts = options();
        let c = classifier(&opts);
        let lines = vec![
            text("A sentence that wraps", 700, 12.0, 1),
            text("onto the next line.", 686, 12.0, 1),
        ];
        let blocks = c.classify(&lines);
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Paragraph { text } => {
                assert_eq!(text, "A sentence that wraps onto the next line.")
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn test_hyphen_rejoin_in_paragraph() {
        let opts = options();
        let c = classifier(&opts);
        let lines = vec![
            text("implemen-", 700, 12.0, 1),
            text("tation details", 686, 12.0, 1),
        ];
        let blocks = c.classify(&lines);
        match &blocks[0] {
            Block::Paragraph { text } => assert_eq!(text, "implementation details"),
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn test_equation_with_label() {
        let opts = options();
        let c = classifier(&opts);
        let lines = vec![text("E = mc\u{00B2}   (3)", 700, 12.0, 1)];
        let blocks = c.classify(&lines);
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Equation { expr, label } => {
                assert_eq!(expr, "E = mc\u{00B2}");
                assert_eq!(label.as_deref(), Some("(3)"));
            }
            other => panic!("expected equation, got {other:?}"),
        }
    }

    #[test]
    fn test_math_dense_line_is_equation() {
        let opts = options();
        let c = classifier(&opts);
        let lines = vec![text("\u{03B1} + \u{03B2} = \u{03B3} \u{2264} \u{03B4}", 700, 12.0, 1)];
        let blocks = c.classify(&lines);
        assert!(matches!(&blocks[0], Block::Equation { .. }));
    }

    #[test]
    fn test_prose_with_parenthetical_number_is_not_equation() {
        let opts = options();
        let c = classifier(&opts);
        let lines = vec![text(
            "The committee met three times this year (3)",
            700,
            12.0,
            1,
        )];
        let blocks = c.classify(&lines);
        assert!(matches!(&blocks[0], Block::Paragraph { .. }));
    }

    #[test]
    fn test_reference_entries_accumulate() {
        let opts = options();
        let c = classifier(&opts);
        let lines = vec![
            text("[1] Knuth, The Art of Computer Programming.", 700, 10.0, 1),
            text("[2] Lamport, Time, Clocks, and the Ordering of Events.", 686, 10.0, 1),
        ];
        let blocks = c.classify(&lines);
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::References { entries } => assert_eq!(entries.len(), 2),
            other => panic!("expected references, got {other:?}"),
        }
    }

    #[test]
    fn test_section_toc_needs_two_entries() {
        let opts = options();
        let c = classifier(&opts);
        let lines = vec![
            text("Subtopic A ......... 12", 700, 12.0, 1),
            text("Subtopic B ......... 19", 686, 12.0, 1),
        ];
        let blocks = c.classify(&lines);
        assert_eq!(blocks.len(), 1);
        assert!(matches!(&blocks[0], Block::SectionToc { entries } if entries.len() == 2));

        // A single leader-shaped line downgrades to a paragraph
        let lines = vec![
            text("Wait ......... 12", 700, 12.0, 1),
            text("ordinary prose after.", 686, 12.0, 1),
        ];
        let blocks = c.classify(&lines);
        assert_eq!(blocks.len(), 1);
        assert!(matches!(&blocks[0], Block::Paragraph { .. }));
    }

    #[test]
    fn test_image_marker_flushes_and_emits() {
        use crate::model::{Image, ImageData};
        let opts = options();
        let c = classifier(&opts);
        let image = Image {
            data: ImageData::default(),
            width: 64,
            height: 64,
            natural_width: 80.0,
            natural_height: 80.0,
            pdf_y: 690.0,
            page: 1,
        };
        let lines = vec![
            text("Before the figure.", 700, 12.0, 1),
            Line::Image(image),
            text("After the figure.", 660, 12.0, 1),
        ];
        let blocks = c.classify(&lines);
        assert_eq!(blocks.len(), 3);
        assert!(matches!(&blocks[1], Block::Image { .. }));
    }

    #[test]
    fn test_delimiter_depth_skips_strings() {
        assert_eq!(update_delimiter_depth(0, "call(\"with ) paren\""), 1);
        assert_eq!(update_delimiter_depth(1, ")"), 0);
        assert_eq!(update_delimiter_depth(0, ") stray closer"), 0);
        assert_eq!(update_delimiter_depth(0, "a { b [ c ( d"), 3);
    }

    #[test]
    fn test_blank_line_terminates_accumulation() {
        let opts = options();
        let c = classifier(&opts);
        let lines = vec![
            text("First paragraph.", 700, 12.0, 1),
            text("   ", 686, 12.0, 1),
            text("Second paragraph.", 672, 12.0, 1),
        ];
        let blocks = c.classify(&lines);
        assert_eq!(blocks.len(), 2);
    }
}
