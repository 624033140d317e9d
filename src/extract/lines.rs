//! Glyph-run to line aggregation.

use std::collections::HashMap;

use crate::decoder::GlyphRun;
use crate::model::TextLine;
use crate::normalize::normalize_run;

/// Group one page's glyph runs into reading-order lines.
///
/// Runs whose transforms share the same rounded Y land on the same line;
/// text is concatenated in encounter order, the font size is the maximum
/// run height (falling back to the transform's vertical scale), and the
/// font name is the first non-empty one seen. Lines are returned sorted by
/// descending Y — page space grows upward, so this is top-to-bottom
/// reading order.
///
/// Grouping by exact rounded Y assumes axis-aligned text with no two
/// distinct lines on an identical rounded baseline. That holds for typical
/// single- and multi-column prose; rotated or curved text is a known
/// limitation and will mis-group.
pub fn aggregate_lines(runs: &[GlyphRun], page: u32) -> Vec<TextLine> {
    let mut by_y: HashMap<i32, TextLine> = HashMap::with_capacity(runs.len() / 4 + 1);
    let mut order: Vec<i32> = Vec::new();

    for run in runs {
        let y = run.transform.ty().round() as i32;
        let size = if run.height > 0.0 {
            run.height
        } else {
            run.transform.vertical_scale().abs()
        };

        let line = by_y.entry(y).or_insert_with(|| {
            order.push(y);
            TextLine {
                y,
                text: String::new(),
                font_size: 0.0,
                font_name: String::new(),
                page,
            }
        });
        line.text.push_str(&normalize_run(&run.text));
        line.font_size = line.font_size.max(size);
        if line.font_name.is_empty() && !run.font_name.is_empty() {
            line.font_name = run.font_name.clone();
        }
    }

    let mut lines: Vec<TextLine> = order
        .into_iter()
        .filter_map(|y| by_y.remove(&y))
        .collect();
    lines.sort_by(|a, b| b.y.cmp(&a.y));
    lines
}

/// Median font size across all lines of the document, the baseline for
/// every heading heuristic.
///
/// Sizes are rounded, sizes of 4 and below are discarded as artifacts, and
/// an empty sample falls back to 12.0.
pub fn median_font_size<'a, I>(lines: I) -> f32
where
    I: IntoIterator<Item = &'a TextLine>,
{
    let mut sizes: Vec<i32> = lines
        .into_iter()
        .map(|l| l.font_size.round() as i32)
        .filter(|&s| s > 4)
        .collect();
    if sizes.is_empty() {
        return 12.0;
    }
    sizes.sort_unstable();
    sizes[sizes.len() / 2] as f32
}
