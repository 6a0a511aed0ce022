use serde::{Deserialize, Serialize};

use crate::parser::{Document, NOT_AVAILABLE};

/// Provenance metadata denormalized onto every chunk. Key names are part of
/// the retrieval contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub source_document_type: String,
    pub source_official_number: String,
    pub source_date: String,
    pub source_category: String,
    pub source_article_number: String,
}

/// One retrieval-unit text fragment derived from an article or a title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub metadata: ChunkMetadata,
}

/// Derive retrieval chunks from one document: one per article, or exactly
/// one title chunk when there are no articles (individual decisions). Pure,
/// order-preserving projection, no filtering.
pub fn chunk_document(doc: &Document) -> Vec<Chunk> {
    if doc.articles.is_empty() {
        return vec![Chunk {
            text: format!("{}: {}", doc.document_type, doc.title),
            metadata: metadata_for(doc, NOT_AVAILABLE),
        }];
    }

    doc.articles
        .iter()
        .map(|article| Chunk {
            text: format!("Article {}: {}", article.number, article.content),
            metadata: metadata_for(doc, &article.number),
        })
        .collect()
}

fn metadata_for(doc: &Document, article_number: &str) -> ChunkMetadata {
    ChunkMetadata {
        source_document_type: doc.document_type.clone(),
        source_official_number: doc.official_number.clone(),
        source_date: doc.date.clone(),
        source_category: doc.category.clone(),
        source_article_number: article_number.to_string(),
    }
}
