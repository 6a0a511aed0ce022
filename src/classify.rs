/// Ordered keyword table: first containment match wins, so order matters
/// for type strings that could carry more than one keyword.
const CATEGORY_TABLE: &[(&str, &str)] = &[
    ("décret", "Decree"),
    ("loi", "Law"),
    ("arrêté", "Order"),
    ("décision", "Decision"),
    ("circulaire", "Circular"),
    ("ordonnance", "Ordinance"),
];

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Map a raw document type onto the fixed category vocabulary. Total and
/// deterministic: every input gets exactly one category.
pub fn categorize(document_type: &str) -> String {
    let lower = document_type.to_lowercase();
    CATEGORY_TABLE
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, category)| (*category).to_string())
        .unwrap_or_else(|| UNCATEGORIZED.to_string())
}
