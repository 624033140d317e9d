//! Per-run character repair.
//!
//! PDF text extraction garbles characters in a handful of recurring ways:
//! ligature codepoints left intact, Windows-1252 bytes decoded as raw
//! Latin-1 C1 controls (the most common failure in Type 1 and older fonts),
//! stray control and zero-width characters, Private Use Area glyph mappings
//! with no Unicode meaning, and decomposed diacritics delivered as separate
//! codepoints. This module fixes all of them in one pass.

use unicode_normalization::UnicodeNormalization;

/// Expand a ligature codepoint to its constituent letters.
fn ligature(c: char) -> Option<&'static str> {
    Some(match c {
        '\u{FB00}' => "ff",
        '\u{FB01}' => "fi",
        '\u{FB02}' => "fl",
        '\u{FB03}' => "ffi",
        '\u{FB04}' => "ffl",
        '\u{FB05}' => "st", // long-s + t
        '\u{FB06}' => "st",
        '\u{017F}' => "s",  // ſ (long s)
        '\u{1E9E}' => "SS", // ẞ, pre-2017 capital sharp s substitute
        _ => return None,
    })
}

/// Map a raw Latin-1 C1 codepoint to its Windows-1252 meaning.
///
/// Fonts with WinAnsiEncoding sometimes leave bytes 0x80-0x9F as their raw
/// ISO-8859-1 codepoints instead of the intended punctuation or currency
/// characters.
fn win1252_fixup(c: char) -> Option<char> {
    Some(match c {
        '\u{0080}' => '\u{20AC}', // €
        '\u{0082}' => '\u{201A}', // ‚
        '\u{0083}' => '\u{0192}', // ƒ
        '\u{0084}' => '\u{201E}', // „
        '\u{0085}' => '\u{2026}', // …
        '\u{0086}' => '\u{2020}', // †
        '\u{0087}' => '\u{2021}', // ‡
        '\u{0088}' => '\u{02C6}', // ˆ
        '\u{0089}' => '\u{2030}', // ‰
        '\u{008A}' => '\u{0160}', // Š
        '\u{008B}' => '\u{2039}', // ‹
        '\u{008C}' => '\u{0152}', // Œ
        '\u{008E}' => '\u{017D}', // Ž
        '\u{0091}' => '\u{2018}', // '
        '\u{0092}' => '\u{2019}', // '
        '\u{0093}' => '\u{201C}', // "
        '\u{0094}' => '\u{201D}', // "
        '\u{0095}' => '\u{2022}', // •
        '\u{0096}' => '\u{2013}', // –
        '\u{0097}' => '\u{2014}', // —
        '\u{0098}' => '\u{02DC}', // ˜
        '\u{0099}' => '\u{2122}', // ™
        '\u{009A}' => '\u{0161}', // š
        '\u{009B}' => '\u{203A}', // ›
        '\u{009C}' => '\u{0153}', // œ
        '\u{009E}' => '\u{017E}', // ž
        '\u{009F}' => '\u{0178}', // Ÿ
        _ => return None,
    })
}

/// Codepoints dropped outright: controls, soft hyphens, zero-width
/// characters, and Private Use Area mappings.
fn should_strip(c: char) -> bool {
    let cp = c as u32;
    // C0 controls except HT, LF, CR
    if cp < 0x20 && cp != 0x09 && cp != 0x0A && cp != 0x0D {
        return true;
    }
    // Soft hyphen is a line-break hint, not a visible character
    if cp == 0x00AD {
        return true;
    }
    // Zero-width (non-)joiner, zero-width space, BOM
    if matches!(cp, 0x200B | 0x200C | 0x200D | 0xFEFF) {
        return true;
    }
    // BMP Private Use Area
    if (0xE000..=0xF8FF).contains(&cp) {
        return true;
    }
    // Supplementary Private Use Areas (planes 15-16)
    cp >= 0xF0000
}

/// Normalize one raw glyph-run string.
///
/// Applied to every run before line aggregation. Never fails; input with
/// no recognized garbling passes through unchanged (modulo stripping and
/// NFC composition). Idempotent.
pub fn normalize_run(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if let Some(fixed) = win1252_fixup(c) {
            out.push(fixed);
        } else if let Some(expansion) = ligature(c) {
            out.push_str(expansion);
        } else if !should_strip(c) {
            out.push(c);
        }
    }

    // NFC recombines any base char + combining diacritic pairs the decoder
    // delivered decomposed.
    out.nfc().collect()
}
