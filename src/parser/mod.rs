pub mod clean;
pub mod extract;
pub mod normalize;
pub mod segment;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify;
use extract::SegmentOutcome;

/// Reserved marker for a field that could not be captured.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub number: String,
    pub content: String,
}

/// One structured legal act. Field names are the persistence contract and
/// must serialize exactly as written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub document_type: String,
    pub official_number: String,
    pub date: String,
    pub title: String,
    pub articles: Vec<Article>,
    pub category: String,
}

/// Non-fatal findings collected while structuring one issue. These are the
/// explicit sink that replaces ambient logging inside the extraction path;
/// the CLI decides how to surface them.
#[derive(Debug)]
pub enum Diagnostic {
    /// SOMMAIRE marker absent; the whole text was scanned instead.
    LocatorMiss,
    /// Neither header pattern matched the segment.
    HeaderMiss { segment_index: usize, excerpt: String },
    /// Segment matched structurally but failed validation.
    Rejected { segment_index: usize, title: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::LocatorMiss => {
                write!(f, "SOMMAIRE section not found, scanning from beginning")
            }
            Diagnostic::HeaderMiss { segment_index, excerpt } => {
                write!(f, "no header matched segment #{}: {}", segment_index + 1, excerpt)
            }
            Diagnostic::Rejected { segment_index, title } => {
                write!(
                    f,
                    "segment #{} rejected as degenerate: {}",
                    segment_index + 1,
                    title
                )
            }
        }
    }
}

pub struct IssueStructure {
    pub documents: Vec<Document>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Structure one gazette issue: normalize, locate content, segment, then
/// extract/validate/categorize each segment independently. Always returns a
/// (possibly empty) result set; per-segment failures become diagnostics.
pub fn structure_issue(raw: &str) -> IssueStructure {
    let mut diagnostics = Vec::new();

    let normalized = normalize::pre_clean(raw);
    let (content, located) = normalize::locate_content(&normalized);
    if !located {
        diagnostics.push(Diagnostic::LocatorMiss);
    }

    let mut documents = Vec::new();
    for (index, seg) in segment::split_segments(content).iter().enumerate() {
        match extract::parse_segment(seg.text) {
            SegmentOutcome::Act(act) => {
                let category = classify::categorize(&act.document_type);
                documents.push(Document {
                    document_type: act.document_type,
                    official_number: act.official_number,
                    date: act.date,
                    title: act.title,
                    articles: act.articles,
                    category,
                });
            }
            SegmentOutcome::NoHeader => diagnostics.push(Diagnostic::HeaderMiss {
                segment_index: index,
                excerpt: excerpt(seg.text),
            }),
            SegmentOutcome::Rejected { title } => diagnostics.push(Diagnostic::Rejected {
                segment_index: index,
                title,
            }),
        }
    }

    IssueStructure {
        documents,
        diagnostics,
    }
}

fn excerpt(text: &str) -> String {
    let flat = clean::clean_field(text);
    if flat.chars().count() <= 80 {
        flat
    } else {
        let head: String = flat.chars().take(80).collect();
        format!("{}...", head)
    }
}
