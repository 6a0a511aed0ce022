use std::sync::LazyLock;

use regex::Regex;

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Leading punctuation left behind by OCR: article separators, list dashes.
const LEADING_MARKERS: &[char] = &['.', '-', '—', '–', ' '];

/// Normalize a captured field: collapse line breaks and whitespace runs to
/// single spaces, trim, then strip leading separator punctuation.
/// Idempotent: cleaning a clean string is a no-op.
pub fn clean_field(raw: &str) -> String {
    let collapsed = WS_RE.replace_all(raw.trim(), " ");
    collapsed
        .trim_start_matches(LEADING_MARKERS)
        .trim()
        .to_string()
}
