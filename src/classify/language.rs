//! Code-block language detection.

use std::sync::OnceLock;

use regex::Regex;

fn probes() -> &'static [(Regex, &'static str)] {
    static PROBES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PROBES.get_or_init(|| {
        let table: &[(&str, &str)] = &[
            (r"(?m)^\s*(def |class |import |from |if __name__|print\()", "python"),
            (
                r"(?m)^\s*(function |const |let |var |=>|require\(|module\.exports)",
                "javascript",
            ),
            (
                r"(?m)^\s*(public |private |class |interface |void |int |String |import java)",
                "java",
            ),
            (r"(?m)^\s*(fn |let mut |use |impl |pub |struct |enum )", "rust"),
            (r"(?m)^\s*(func |package |import \(|:=)", "go"),
            (r"(?m)^\s*(#include|int main|std::|cout|cin)", "cpp"),
            (r"(?m)^\s*(<\?php|echo |function |namespace )", "php"),
            (r"(?mi)^\s*(SELECT|INSERT|UPDATE|DELETE|FROM|WHERE)", "sql"),
            (r"(?mi)^\s*(<[a-zA-Z]|<!DOCTYPE)", "html"),
            (r"(?m)^\s*[.#][a-z-]+\s*\{", "css"),
            (r"(?m)^\s*[$\\@]", "bash"),
        ];
        table
            .iter()
            .map(|(pattern, lang)| (Regex::new(pattern).expect("language probe"), *lang))
            .collect()
    })
}

/// Guess the language of a code block from its lines.
///
/// Probes run in order; Python-style and JS-style keywords overlap with
/// later languages, so earlier entries win. Falls back to "plaintext".
pub fn detect_language<S: AsRef<str>>(lines: &[S]) -> &'static str {
    let code = lines
        .iter()
        .map(|l| l.as_ref())
        .collect::<Vec<_>>()
        .join("\n");
    for (re, lang) in probes() {
        if re.is_match(&code) {
            return lang;
        }
    }
    "plaintext"
}
