use std::sync::LazyLock;

use regex::Regex;

static PAGE_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"--- NEW PAGE ---").unwrap());

// Recurring footer: a Hijri date ("9 Joumada Ethania 1446") plus whatever
// trails it on that line.
static HIJRI_FOOTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*\d{1,2}\s+(?:Moharram|Safar|Rabie\s+El\s+Aouel|Rabie\s+Ethani|Joumada\s+El\s+Oula|Joumada\s+Ethania|Rajab|Chaâbane|Ramadhan|Chaoual|Dhou\s+El\s+Kaâda|Dhou\s+El\s+Hidja)\s+\d{4}.*$",
    )
    .unwrap()
});

static BANNER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*JOURNAL OFFICIEL DE LA REPUBLIQUE ALGERIENNE N°\s*\d+.*$").unwrap()
});

static SOMMAIRE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)SOMMAIRE(?:\s*\(suite\))?").unwrap());

/// Strip page-level furniture before any structural analysis: inter-page
/// separators, the Hijri-date issue footer, and the running banner line.
/// Absence of any pattern is a no-op.
pub fn pre_clean(raw: &str) -> String {
    let text = PAGE_BREAK_RE.replace_all(raw, "");
    let text = HIJRI_FOOTER_RE.replace_all(&text, "");
    BANNER_RE.replace_all(&text, "").into_owned()
}

/// Find where substantive content begins: everything after the first
/// SOMMAIRE marker. Returns the whole text and `false` when the marker is
/// absent so segmentation still gets a best-effort attempt.
pub fn locate_content(text: &str) -> (&str, bool) {
    match SOMMAIRE_RE.find(text) {
        Some(m) => (&text[m.end()..], true),
        None => (text, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_page_breaks() {
        let out = pre_clean("page one\n\n--- NEW PAGE ---\n\npage two");
        assert!(!out.contains("NEW PAGE"));
        assert!(out.contains("page one"));
        assert!(out.contains("page two"));
    }

    #[test]
    fn strips_hijri_footer_line() {
        let out = pre_clean("body\n9 Joumada Ethania 1446\n15 décembre 2024\nmore body");
        assert!(!out.contains("Joumada"));
        assert!(out.contains("more body"));
    }

    #[test]
    fn strips_banner_line() {
        let out = pre_clean("a\nJOURNAL OFFICIEL DE LA REPUBLIQUE ALGERIENNE N° 82\nb");
        assert!(!out.contains("JOURNAL OFFICIEL"));
    }

    #[test]
    fn clean_text_is_untouched() {
        let text = "Décret exécutif n° 24-100 du 12 janvier 2024";
        assert_eq!(pre_clean(text), text);
    }

    #[test]
    fn locates_after_first_sommaire() {
        let (content, found) = locate_content("front matter\nSOMMAIRE\nDécret ...");
        assert!(found);
        assert_eq!(content.trim_start(), "Décret ...");
    }

    #[test]
    fn sommaire_suite_and_case() {
        let (content, found) = locate_content("x sommaire (suite) y");
        assert!(found);
        assert_eq!(content, " y");
    }

    #[test]
    fn only_first_marker_splits() {
        let (content, found) = locate_content("SOMMAIRE\na\nSOMMAIRE (suite)\nb");
        assert!(found);
        assert!(content.contains("SOMMAIRE (suite)"));
    }

    #[test]
    fn locator_miss_returns_whole_text() {
        let (content, found) = locate_content("no marker here");
        assert!(!found);
        assert_eq!(content, "no marker here");
    }
}
