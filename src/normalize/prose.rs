//! Post-aggregation prose repair.
//!
//! Fixes punctuation sequences that survive character-level normalization
//! but are still wrong due to font substitution (`--` standing in for an en
//! dash, TeX-style backtick quotes), and rejoins words split across lines
//! with a trailing hyphen. Applied only to paragraph and heading text,
//! never to code lines.

use std::sync::OnceLock;

use regex::Regex;

fn ellipsis_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.{3,}").expect("ellipsis regex"))
}

fn spaces_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Runs of whitespace other than newline
    RE.get_or_init(|| Regex::new(r"[^\S\n]{2,}").expect("spaces regex"))
}

/// Replace isolated `--` with an en dash.
///
/// A pair is isolated when the character before it is not one of `!<>=-`
/// and the character after it is not one of `-!<>=`; this keeps operators
/// like `-->`, `!=-` and decrements untouched.
fn replace_en_dashes(text: &str) -> String {
    const BEFORE: &[char] = &['!', '<', '>', '=', '-'];
    const AFTER: &[char] = &['-', '!', '<', '>', '='];

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '-'
            && i + 1 < chars.len()
            && chars[i + 1] == '-'
            && (i == 0 || !BEFORE.contains(&chars[i - 1]))
            && (i + 2 >= chars.len() || !AFTER.contains(&chars[i + 2]))
        {
            out.push('\u{2013}');
            i += 2;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Normalize a complete prose string (paragraph or heading).
pub fn normalize_prose(text: &str) -> String {
    // Dash repair: triple first so the pair rule never sees it.
    let text = text.replace("---", "\u{2014}");
    let text = replace_en_dashes(&text);

    // TeX-style quote pairs
    let text = text.replace("``", "\u{201C}").replace("''", "\u{201D}");

    // Exactly three periods become an ellipsis; longer runs are left alone
    // (dot leaders, code artifacts).
    let text = ellipsis_re().replace_all(&text, |caps: &regex::Captures| {
        if caps[0].len() == 3 {
            "\u{2026}".to_string()
        } else {
            caps[0].to_string()
        }
    });

    let text = spaces_re().replace_all(&text, " ");
    text.trim().to_string()
}

/// True for letters that may end a hyphenated word fragment.
fn is_word_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || ('\u{00C0}'..='\u{024F}').contains(&c)
}

/// True for letters that signal a continued (lowercase) word fragment.
fn is_lower_letter(c: char) -> bool {
    c.is_ascii_lowercase() || ('\u{00E0}'..='\u{024F}').contains(&c)
}

/// Join prose lines into a single paragraph string, removing word-break
/// hyphens inserted by PDF line wrapping.
///
/// A trailing `<letter>-` followed by a line starting with a lowercase
/// letter is a soft break: the hyphen is dropped and the fragments joined
/// directly ("implemen-" + "tation" becomes "implementation"). Anything
/// else, such as a digit or capital after the hyphen ("Fig. 3-" + "4"),
/// is space-joined. A compound word wrapped at its own hyphen
/// ("state-" + "of-the-art") is indistinguishable from a soft break and
/// loses the hyphen too.
pub fn join_prose_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut iter = lines.iter();
    let mut result = match iter.next() {
        Some(first) => first.as_ref().to_string(),
        None => return String::new(),
    };

    for line in iter {
        let next = line.as_ref();
        let mut tail = result.chars().rev();
        let rejoin = tail.next() == Some('-')
            && tail.next().is_some_and(is_word_letter)
            && next.chars().next().is_some_and(is_lower_letter);

        if rejoin {
            result.pop();
            result.push_str(next);
        } else {
            result.push(' ');
            result.push_str(next);
        }
    }
    result.trim().to_string()
}
