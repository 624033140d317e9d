//! Page-level types.

use serde::{Deserialize, Serialize};

use super::{Image, TextLine};

/// One page's extracted content, prior to segmentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed).
    pub number: u32,

    /// Text lines in reading order (descending Y).
    pub lines: Vec<TextLine>,

    /// Page width in page units.
    pub width: f32,

    /// Page height in page units.
    pub height: f32,

    /// Images recovered from this page's paint operations.
    pub images: Vec<Image>,

    /// Lines in the bottom margin band, as reported by the decoder.
    pub footers: Vec<TextLine>,
}

impl Page {
    /// Footer lines joined with a double space, or `None` if the page has
    /// no footer content.
    pub fn footer_text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .footers
            .iter()
            .map(|l| l.trimmed())
            .filter(|t| !t.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("  "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn footer(text: &str) -> TextLine {
        TextLine {
            y: 30,
            text: text.into(),
            font_size: 8.0,
            font_name: String::new(),
            page: 1,
        }
    }

    #[test]
    fn test_footer_text_join() {
        let page = Page {
            number: 1,
            lines: vec![],
            width: 612.0,
            height: 792.0,
            images: vec![],
            footers: vec![footer("The Rust Book"), footer("14")],
        };
        assert_eq!(page.footer_text().as_deref(), Some("The Rust Book  14"));
    }

    #[test]
    fn test_footer_text_empty() {
        let page = Page {
            number: 1,
            lines: vec![],
            width: 612.0,
            height: 792.0,
            images: vec![],
            footers: vec![footer("   ")],
        };
        assert_eq!(page.footer_text(), None);
    }
}
