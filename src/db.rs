use anyhow::Result;
use rusqlite::Connection;

use crate::chunker::Chunk;
use crate::parser::{Article, Document};

const DB_PATH: &str = "data/legal_data.sqlite";

pub fn connect() -> Result<Connection> {
    std::fs::create_dir_all("data")?;
    let conn = Connection::open(DB_PATH)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

#[cfg(test)]
pub fn connect_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS issues (
            id               INTEGER PRIMARY KEY,
            file_name        TEXT UNIQUE NOT NULL,
            category         TEXT,
            document_count   INTEGER NOT NULL DEFAULT 0,
            diagnostic_count INTEGER NOT NULL DEFAULT 0,
            processed_at     TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS documents (
            id              INTEGER PRIMARY KEY,
            issue_id        INTEGER NOT NULL REFERENCES issues(id),
            document_type   TEXT NOT NULL,
            official_number TEXT NOT NULL,
            date            TEXT NOT NULL,
            title           TEXT NOT NULL,
            category        TEXT NOT NULL,
            articles        TEXT NOT NULL,
            article_count   INTEGER NOT NULL,
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_documents_issue ON documents(issue_id);
        CREATE INDEX IF NOT EXISTS idx_documents_category ON documents(category);

        CREATE TABLE IF NOT EXISTS chunks (
            id              INTEGER PRIMARY KEY,
            document_id     INTEGER NOT NULL REFERENCES documents(id),
            chunk_text      TEXT NOT NULL,
            article_number  TEXT NOT NULL,
            metadata        TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_chunks_document ON chunks(document_id);
        ",
    )?;
    Ok(())
}

// ── Structuring ──

pub fn issue_exists(conn: &Connection, file_name: &str) -> Result<bool> {
    let count: usize = conn.query_row(
        "SELECT COUNT(*) FROM issues WHERE file_name = ?1",
        [file_name],
        |r| r.get(0),
    )?;
    Ok(count > 0)
}

/// Persist one structured issue and its documents in a single transaction.
/// The issue-level category is the first document's, kept as a coarse
/// roll-up for browsing.
pub fn save_issue(
    conn: &Connection,
    file_name: &str,
    documents: &[Document],
    diagnostic_count: usize,
) -> Result<i64> {
    let category = documents.first().map(|d| d.category.as_str());

    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO issues (file_name, category, document_count, diagnostic_count)
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![file_name, category, documents.len(), diagnostic_count],
    )?;
    let issue_id = tx.last_insert_rowid();
    {
        let mut stmt = tx.prepare(
            "INSERT INTO documents
             (issue_id, document_type, official_number, date, title, category, articles, article_count)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for doc in documents {
            let articles = serde_json::to_string(&doc.articles)?;
            stmt.execute(rusqlite::params![
                issue_id,
                doc.document_type,
                doc.official_number,
                doc.date,
                doc.title,
                doc.category,
                articles,
                doc.articles.len(),
            ])?;
        }
    }
    tx.commit()?;
    Ok(issue_id)
}

// ── Chunking ──

pub struct StoredDocument {
    pub id: i64,
    pub document: Document,
}

/// Documents that have no derived chunks yet.
pub fn fetch_unchunked(conn: &Connection, limit: Option<usize>) -> Result<Vec<StoredDocument>> {
    let sql = format!(
        "SELECT d.id, d.document_type, d.official_number, d.date, d.title, d.category, d.articles
         FROM documents d
         LEFT JOIN chunks c ON c.document_id = d.id
         WHERE c.id IS NULL
         ORDER BY d.id{}",
        match limit {
            Some(n) => format!(" LIMIT {}", n),
            None => String::new(),
        }
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(id, document_type, official_number, date, title, category, articles)| {
            let articles: Vec<Article> = serde_json::from_str(&articles)?;
            Ok(StoredDocument {
                id,
                document: Document {
                    document_type,
                    official_number,
                    date,
                    title,
                    articles,
                    category,
                },
            })
        })
        .collect()
}

pub fn save_chunks(conn: &Connection, document_id: i64, chunks: &[Chunk]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO chunks (document_id, chunk_text, article_number, metadata)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for chunk in chunks {
            let metadata = serde_json::to_string(&chunk.metadata)?;
            count += stmt.execute(rusqlite::params![
                document_id,
                chunk.text,
                chunk.metadata.source_article_number,
                metadata,
            ])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

// ── Overview ──

pub struct OverviewRow {
    pub document_type: String,
    pub official_number: String,
    pub date: String,
    pub title: String,
    pub category: String,
    pub article_count: i64,
}

pub fn fetch_overview(
    conn: &Connection,
    category: Option<&str>,
    limit: usize,
) -> Result<Vec<OverviewRow>> {
    let mut conditions = Vec::new();
    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if let Some(c) = category {
        conditions.push(format!("category = ?{}", params.len() + 1));
        params.push(Box::new(c.to_string()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        "SELECT document_type, official_number, date, title, category, article_count
         FROM documents{}
         ORDER BY id
         LIMIT {}",
        where_clause, limit
    );

    let mut stmt = conn.prepare(&sql)?;
    let param_refs: Vec<&dyn rusqlite::types::ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let rows = stmt
        .query_map(param_refs.as_slice(), |row| {
            Ok(OverviewRow {
                document_type: row.get(0)?,
                official_number: row.get(1)?,
                date: row.get(2)?,
                title: row.get(3)?,
                category: row.get(4)?,
                article_count: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ── Stats ──

pub struct Stats {
    pub issues: usize,
    pub documents: usize,
    pub chunks: usize,
    pub unchunked: usize,
    pub diagnostics: usize,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let issues: usize = conn.query_row("SELECT COUNT(*) FROM issues", [], |r| r.get(0))?;
    let documents: usize = conn.query_row("SELECT COUNT(*) FROM documents", [], |r| r.get(0))?;
    let chunks: usize = conn.query_row("SELECT COUNT(*) FROM chunks", [], |r| r.get(0))?;
    let unchunked: usize = conn.query_row(
        "SELECT COUNT(*) FROM documents d
         LEFT JOIN chunks c ON c.document_id = d.id
         WHERE c.id IS NULL",
        [],
        |r| r.get(0),
    )?;
    let diagnostics: usize = conn.query_row(
        "SELECT COALESCE(SUM(diagnostic_count), 0) FROM issues",
        [],
        |r| r.get(0),
    )?;
    Ok(Stats {
        issues,
        documents,
        chunks,
        unchunked,
        diagnostics,
    })
}
