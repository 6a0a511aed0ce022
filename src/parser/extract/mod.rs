pub mod articles;
pub mod header;

use crate::parser::clean::clean_field;
use crate::parser::{Article, NOT_AVAILABLE};
use header::HeaderMatch;

/// Structural fields of one act, before categorization.
#[derive(Debug)]
pub struct StructuredAct {
    pub document_type: String,
    pub official_number: String,
    pub date: String,
    pub title: String,
    pub articles: Vec<Article>,
}

/// Per-segment result. Failures stay local values so one bad segment never
/// aborts its siblings.
#[derive(Debug)]
pub enum SegmentOutcome {
    Act(StructuredAct),
    /// Neither header pattern matched.
    NoHeader,
    /// Structurally matched but judged degenerate by validation.
    Rejected { title: String },
}

/// Extract and validate one candidate segment: header (dual-pattern),
/// articles (full headers only, strictly after the header end), field
/// cleaning, then the degenerate-segment checks.
pub fn parse_segment(segment: &str) -> SegmentOutcome {
    let Some(matched) = header::match_header(segment) else {
        return SegmentOutcome::NoHeader;
    };

    let act = match matched {
        HeaderMatch::Full {
            document_type,
            number,
            date,
            title,
            body_start,
        } => StructuredAct {
            document_type: field_or_na(&document_type),
            official_number: field_or_na(&number),
            date: field_or_na(&date),
            title: field_or_na(&title),
            // Scanning from body_start is what keeps header text from being
            // re-captured as "Article 1".
            articles: articles::parse_articles(&segment[body_start..]),
        },
        // Individual decisions have no articles by definition.
        HeaderMatch::Individual {
            document_type,
            date,
            title,
        } => StructuredAct {
            document_type: field_or_na(&document_type),
            official_number: NOT_AVAILABLE.to_string(),
            date: field_or_na(&date),
            title: field_or_na(&title),
            articles: Vec::new(),
        },
    };

    validate(act)
}

/// No usable content at all, then the personnel-action allowlist: acts with
/// neither number nor articles are kept only when the title marks an
/// appointment or an end of functions. The substring allowlist is a known
/// fragile heuristic; keep it narrow.
fn validate(act: StructuredAct) -> SegmentOutcome {
    if act.title == NOT_AVAILABLE && act.articles.is_empty() {
        return SegmentOutcome::Rejected { title: act.title };
    }

    if act.official_number == NOT_AVAILABLE && act.articles.is_empty() {
        let personnel_action =
            act.title.contains("nomination") || act.title.contains("mettant fin");
        if !personnel_action {
            return SegmentOutcome::Rejected { title: act.title };
        }
    }

    SegmentOutcome::Act(act)
}

fn field_or_na(raw: &str) -> String {
    let cleaned = clean_field(raw);
    if cleaned.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECREE: &str = "Décret exécutif n° 24-100 du 12 janvier 2024 portant création\nd'un établissement\nLe Président de la République,\nVu la Constitution ;\nArticle 1er. — Il est créé un établissement public.\nArticle 2. — Le présent décret sera publié.\nFait à Alger, le 12 janvier 2024.\n";

    fn parsed(segment: &str) -> StructuredAct {
        match parse_segment(segment) {
            SegmentOutcome::Act(act) => act,
            other => panic!("expected an act, got {:?}", other),
        }
    }

    #[test]
    fn full_decree_round_trip() {
        let act = parsed(DECREE);
        assert_eq!(act.document_type, "Décret exécutif");
        assert_eq!(act.official_number, "24-100");
        assert_eq!(act.date, "12 janvier 2024");
        assert_eq!(act.title, "création d'un établissement");
        assert_eq!(act.articles.len(), 2);
        assert_eq!(act.articles[0].number, "1er");
        assert_eq!(act.articles[0].content, "Il est créé un établissement public.");
    }

    #[test]
    fn first_article_never_swallowed_by_title() {
        // Regression guard for the "missing Article 1" failure mode: an act
        // whose header runs straight into the articles.
        let segment = "Arrêté interministériel n° 45 du 9 juin 2024 fixant la liste des pièces\nArticle 1er. — La liste est annexée.\nArticle 2. — Publication au Journal officiel.\n";
        let act = parsed(segment);
        assert!(!act.title.contains("Article"));
        assert_eq!(act.articles.len(), 2);
        assert_eq!(act.articles[0].number, "1er");
    }

    #[test]
    fn individual_decision_accepted_without_number_or_articles() {
        let act = parsed("Décret présidentiel du 3 mars 2024 mettant fin aux fonctions de M. X.\n");
        assert_eq!(act.official_number, NOT_AVAILABLE);
        assert!(act.articles.is_empty());
        assert!(act.title.starts_with("mettant fin"));
    }

    #[test]
    fn appointment_accepted_by_allowlist() {
        let act = parsed("Arrêté du 7 avril 2024 portant nomination de Mme Y.\n");
        assert!(act.title.contains("nomination"));
        assert!(act.articles.is_empty());
    }

    #[test]
    fn no_header_is_reported_not_dropped_silently() {
        assert!(matches!(
            parse_segment("Décision illisible sans aucune structure\n"),
            SegmentOutcome::NoHeader
        ));
    }

    #[test]
    fn degenerate_act_rejected() {
        let act = StructuredAct {
            document_type: "Décret exécutif".into(),
            official_number: NOT_AVAILABLE.into(),
            date: "1 mars 2024".into(),
            title: "approbation d'une convention".into(),
            articles: Vec::new(),
        };
        assert!(matches!(
            validate(act),
            SegmentOutcome::Rejected { title } if title.contains("approbation")
        ));
    }

    #[test]
    fn sentinel_title_without_articles_rejected_first() {
        let act = StructuredAct {
            document_type: "Décret exécutif".into(),
            official_number: "24-101".into(),
            date: "2 mars 2024".into(),
            title: NOT_AVAILABLE.into(),
            articles: Vec::new(),
        };
        assert!(matches!(validate(act), SegmentOutcome::Rejected { .. }));
    }

    #[test]
    fn numberless_act_with_articles_is_kept() {
        let act = StructuredAct {
            document_type: "Décision".into(),
            official_number: NOT_AVAILABLE.into(),
            date: "4 avril 2024".into(),
            title: "délégation de signature".into(),
            articles: vec![Article {
                number: "1er".into(),
                content: "Délégation est donnée.".into(),
            }],
        };
        assert!(matches!(validate(act), SegmentOutcome::Act(_)));
    }
}
