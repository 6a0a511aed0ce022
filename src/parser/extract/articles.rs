use std::sync::LazyLock;

use regex::Regex;

use crate::parser::clean::clean_field;
use crate::parser::Article;

// "Art." / "Article" at line start, a number token ("2", "1er", "15bis"),
// then an optional period and dash. The number must start with a digit so
// that plural "Articles ..." lines stay body text instead of becoming a
// marker with number "s".
static ARTICLE_MARK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:Art\.|Article)\s*(?P<number>\d\w*)\s*\.?\s*[—–\-]?\s*").unwrap()
});

// Closing formulas that end the article body of an act.
static CLOSING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(?:Fait\s+à\s+Alger|Le\s+ministre|Par\s+ces\s+motifs)").unwrap()
});

/// Scan an act body (strictly after the header) for article records. Each
/// article's content runs to the nearest of the next marker, a closing
/// formula, or the end of the body. Source order, duplicates kept.
pub fn parse_articles(body: &str) -> Vec<Article> {
    let marks: Vec<(usize, usize, String)> = ARTICLE_MARK_RE
        .captures_iter(body)
        .map(|caps| {
            let m = caps.get(0).unwrap();
            (m.start(), m.end(), caps["number"].to_string())
        })
        .collect();
    let closings: Vec<usize> = CLOSING_RE.find_iter(body).map(|m| m.start()).collect();

    marks
        .iter()
        .enumerate()
        .map(|(i, (_, content_start, number))| {
            let next_mark = marks.get(i + 1).map(|m| m.0).unwrap_or(body.len());
            let closing = closings
                .iter()
                .copied()
                .find(|&c| c >= *content_start)
                .unwrap_or(body.len());
            let stop = next_mark.min(closing);
            Article {
                number: clean_field(number),
                content: clean_field(&body[*content_start..stop]),
            }
        })
        .collect()
}
