use std::sync::LazyLock;

use regex::Regex;

// Full header: type, official number after "n°", date after "du", title
// after an action verb. Matched only against the slice bounded by the first
// structural stop marker, which is what keeps the greedy title capture from
// swallowing the first article.
static FULL_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?isx)
        ^
        (?P<type>(?:Décret|Loi|Arrêté|Décision)[\w\s\-\./]+?)
        \s+n°\s*(?P<number>[\d\s\-\./]+?)
        \s+du\s+(?P<date>.*?)
        \s+(?:portant|relative\s+au|fixant|modifiant|mettant)\s+
        (?P<title>.*)
        $
        ",
    )
    .unwrap()
});

// Individual decisions (appointments, end-of-functions) carry no official
// number and no article body, so the title runs greedily to end of line.
static INDIVIDUAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?imx)
        ^
        (?P<type>Décret\s+(?:présidentiel|exécutif)|Arrêté)
        \s+du\s+(?P<date>.+?)
        \s+(?P<title>(?:mettant\s+fin|portant\s+nomination).*)
        ",
    )
    .unwrap()
});

// Structural markers that end a header: preamble openers, the first
// constitutional reference, or the first article.
static HEADER_STOPS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?im)^\s*Le\s+Président\s+de\s+la\s+République,",
        r"(?im)^\s*Le\s+Premier\s+ministre,",
        r"(?im)^\s*Vu\s+la\s+Constitution",
        r"(?im)^\s*Article\s*\d",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Header captures, still raw (uncleaned). `Full::body_start` is the offset
/// in the segment where the header stops and article scanning may begin.
#[derive(Debug)]
pub enum HeaderMatch {
    Full {
        document_type: String,
        number: String,
        date: String,
        title: String,
        body_start: usize,
    },
    Individual {
        document_type: String,
        date: String,
        title: String,
    },
}

/// Try the two header patterns in mandatory order: full header first,
/// individual-decision fallback second. `None` means the segment carries no
/// recoverable header and is dropped by the caller.
pub fn match_header(segment: &str) -> Option<HeaderMatch> {
    if let Some(found) = match_full(segment) {
        return Some(found);
    }
    match_individual(segment)
}

fn match_full(segment: &str) -> Option<HeaderMatch> {
    // No stop marker means no preamble and no articles follow, so the full
    // pattern cannot apply.
    let body_start = header_stop(segment)?;
    let caps = FULL_HEADER_RE.captures(&segment[..body_start])?;
    Some(HeaderMatch::Full {
        document_type: caps["type"].to_string(),
        number: caps["number"].to_string(),
        date: caps["date"].to_string(),
        title: caps["title"].to_string(),
        body_start,
    })
}

fn match_individual(segment: &str) -> Option<HeaderMatch> {
    let caps = INDIVIDUAL_RE.captures(segment)?;
    Some(HeaderMatch::Individual {
        document_type: caps["type"].to_string(),
        date: caps["date"].to_string(),
        title: caps["title"].to_string(),
    })
}

/// Minimum offset of any stop marker in the segment.
fn header_stop(segment: &str) -> Option<usize> {
    HEADER_STOPS
        .iter()
        .filter_map(|re| re.find(segment).map(|m| m.start()))
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_SEGMENT: &str = "Décret exécutif n° 24-100 du 12 janvier 2024 portant création\nd'un établissement\nLe Président de la République,\nVu la Constitution ;\nArticle 1er. — Il est créé un établissement.\n";

    #[test]
    fn full_header_captures() {
        match match_header(FULL_SEGMENT) {
            Some(HeaderMatch::Full {
                document_type,
                number,
                date,
                title,
                body_start,
            }) => {
                assert_eq!(document_type, "Décret exécutif");
                assert_eq!(number, "24-100");
                assert_eq!(date, "12 janvier 2024");
                assert!(title.starts_with("création"));
                assert!(FULL_SEGMENT[body_start..].trim_start().starts_with("Le Président"));
            }
            other => panic!("expected full header, got {:?}", other),
        }
    }

    #[test]
    fn title_stops_before_first_article() {
        let segment =
            "Arrêté interministériel n° 12 du 2 février 2024 fixant les modalités\nArticle 1er. — Les modalités sont fixées.\n";
        match match_header(segment) {
            Some(HeaderMatch::Full { title, body_start, .. }) => {
                assert!(!title.contains("Article"));
                assert!(segment[body_start..].contains("Article 1er"));
            }
            other => panic!("expected full header, got {:?}", other),
        }
    }

    #[test]
    fn full_requires_a_stop_marker() {
        // Header line alone, nothing structural after it: the full pattern
        // must not fire, and there is no individual match either.
        let segment = "Décret exécutif n° 24-100 du 12 janvier 2024 portant création d'un institut\n";
        assert!(match_header(segment).is_none());
    }

    #[test]
    fn individual_termination() {
        let segment = "Décret présidentiel du 3 mars 2024 mettant fin aux fonctions de M. X.\n";
        match match_header(segment) {
            Some(HeaderMatch::Individual {
                document_type,
                date,
                title,
            }) => {
                assert_eq!(document_type, "Décret présidentiel");
                assert_eq!(date, "3 mars 2024");
                assert!(title.starts_with("mettant fin"));
            }
            other => panic!("expected individual header, got {:?}", other),
        }
    }

    #[test]
    fn individual_appointment() {
        let segment = "Arrêté du 7 avril 2024 portant nomination de Mme Y.\n";
        match match_header(segment) {
            Some(HeaderMatch::Individual { title, .. }) => {
                assert!(title.starts_with("portant nomination"));
            }
            other => panic!("expected individual header, got {:?}", other),
        }
    }

    #[test]
    fn individual_title_runs_to_end_of_line_only() {
        let segment =
            "Décret présidentiel du 3 mars 2024 mettant fin aux fonctions de M. X.\nseconde ligne\n";
        match match_header(segment) {
            Some(HeaderMatch::Individual { title, .. }) => {
                assert!(title.ends_with("de M. X."));
                assert!(!title.contains("seconde"));
            }
            other => panic!("expected individual header, got {:?}", other),
        }
    }

    #[test]
    fn full_takes_precedence_over_embedded_individual_line() {
        // A mis-segmented blob where an individual-looking act trails a full
        // header: the full pattern must win.
        let segment = "Décret exécutif n° 24-200 du 5 mai 2024 portant organisation des services\nLe Premier ministre,\nArticle 1er. — x\nDécret présidentiel du 6 mai 2024 portant nomination de M. Z.\n";
        assert!(matches!(
            match_header(segment),
            Some(HeaderMatch::Full { .. })
        ));
    }

    #[test]
    fn unmatchable_segment_is_none() {
        assert!(match_header("Décision sans structure reconnaissable\n").is_none());
    }
}
