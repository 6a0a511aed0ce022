use std::sync::LazyLock;

use regex::Regex;

// Start-of-line keywords that open a legal act.
static ACT_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^(?:Décret|Loi|Arrêté|Décision)\s").unwrap());

/// One candidate act: a contiguous slice of the located content plus its
/// offsets in that content.
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

/// Split content at act start markers. Segments come back in source order,
/// non-overlapping, each ending where the next begins; the last one runs to
/// the end of the content. No boundaries means no segments, which is a
/// valid outcome for an issue.
pub fn split_segments(content: &str) -> Vec<Segment<'_>> {
    let starts: Vec<usize> = ACT_START_RE.find_iter(content).map(|m| m.start()).collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(content.len());
            Segment {
                start,
                end,
                text: &content[start..end],
            }
        })
        .collect()
}
