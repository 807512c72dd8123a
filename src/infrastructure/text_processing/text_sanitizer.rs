use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

// Word split across a line break by a hyphen, e.g. "retrie-\nval".
static HYPHENATED_BREAK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?P<head>\w)-[ \t]*\r?\n[ \t]*(?P<tail>\w)").ok());

/// Normalizes text pulled out of binary documents before it is chunked: NFKC,
/// invisible characters stripped, hyphenated line breaks joined, whitespace collapsed
/// and runs of blank lines reduced to one paragraph break.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw
        .nfkc()
        .filter(|c| !is_invisible(*c))
        .collect();
    let joined = match HYPHENATED_BREAK.as_ref() {
        Some(pattern) => pattern.replace_all(&normalized, "$head$tail"),
        None => Cow::Borrowed(normalized.as_str()),
    };

    let mut out = String::with_capacity(joined.len());
    let mut pending_break: Option<&str> = None;

    for line in joined.lines() {
        let line = line.trim();

        if line.is_empty() {
            if !out.is_empty() {
                pending_break = Some("\n\n");
            }
            continue;
        }

        if let Some(separator) = pending_break.take() {
            out.push_str(separator);
        } else if !out.is_empty() {
            out.push('\n');
        }

        let mut last_was_space = false;
        for ch in line.chars() {
            if ch.is_whitespace() {
                if !last_was_space {
                    out.push(' ');
                }
                last_was_space = true;
            } else {
                out.push(ch);
                last_was_space = false;
            }
        }
    }

    out
}

fn is_invisible(c: char) -> bool {
    matches!(c, '\u{0}' | '\u{ad}' | '\u{200b}' | '\u{200c}' | '\u{200d}' | '\u{feff}')
}
