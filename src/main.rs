mod chunker;
mod classify;
mod db;
mod parser;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "dz_gazette", about = "Structure OCR text of the Algerian Official Gazette")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Structure OCR .txt issue files into legal-act documents
    Parse {
        /// Issue text file, or directory scanned recursively
        input: PathBuf,
        /// Max issues to process (default: all new files)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Derive retrieval chunks for stored documents that have none yet
    Chunk {
        /// Max documents to chunk (default: all unchunked)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Parse + chunk in one pipeline
    Run {
        /// Issue text file, or directory scanned recursively
        input: PathBuf,
        /// Max issues to process
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show structuring statistics
    Stats,
    /// Documents overview table
    Overview {
        /// Filter by category (Decree, Law, Order, Decision, Circular, Ordinance, Uncategorized)
        #[arg(short, long)]
        category: Option<String>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { input, limit } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let counts = parse_issues(&conn, &input, limit)?;
            counts.print();
            Ok(())
        }
        Commands::Chunk { limit } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let saved = chunk_documents(&conn, limit)?;
            println!("Saved {} chunks.", saved);
            Ok(())
        }
        Commands::Run { input, limit } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let counts = parse_issues(&conn, &input, limit)?;
            counts.print();
            let saved = chunk_documents(&conn, None)?;
            println!("Saved {} chunks.", saved);
            Ok(())
        }
        Commands::Stats => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Issues:      {}", s.issues);
            println!("Documents:   {}", s.documents);
            println!("Chunks:      {}", s.chunks);
            println!("Unchunked:   {}", s.unchunked);
            println!("Diagnostics: {}", s.diagnostics);
            Ok(())
        }
        Commands::Overview { category, limit } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let rows = db::fetch_overview(&conn, category.as_deref(), limit)?;
            if rows.is_empty() {
                println!("No documents found.");
                return Ok(());
            }

            println!(
                "{:>3} | {:<22} | {:<10} | {:<18} | {:<12} | {:>4} | {:<40}",
                "#", "Type", "N°", "Date", "Category", "Art.", "Title"
            );
            println!("{}", "-".repeat(125));
            for (i, r) in rows.iter().enumerate() {
                println!(
                    "{:>3} | {:<22} | {:<10} | {:<18} | {:<12} | {:>4} | {:<40}",
                    i + 1,
                    truncate(&r.document_type, 22),
                    truncate(&r.official_number, 10),
                    truncate(&r.date, 18),
                    r.category,
                    r.article_count,
                    truncate(&r.title, 40),
                );
            }
            println!("\n{} documents", rows.len());
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

struct ParseCounts {
    issues: usize,
    skipped: usize,
    errors: usize,
    documents: usize,
    diagnostics: usize,
}

impl ParseCounts {
    fn print(&self) {
        println!(
            "Structured {} issues ({} already stored, {} unreadable): {} documents, {} diagnostics.",
            self.issues, self.skipped, self.errors, self.documents, self.diagnostics,
        );
    }
}

/// Structure every new issue file under `input` and persist the results.
/// Issues are independent, so the structuring itself runs on the rayon
/// pool; DB writes stay on this thread.
fn parse_issues(
    conn: &rusqlite::Connection,
    input: &Path,
    limit: Option<usize>,
) -> Result<ParseCounts> {
    let mut files = collect_issue_files(input)?;
    anyhow::ensure!(!files.is_empty(), "no .txt issue files under {}", input.display());
    files.sort();

    let mut counts = ParseCounts {
        issues: 0,
        skipped: 0,
        errors: 0,
        documents: 0,
        diagnostics: 0,
    };

    // Re-ingesting a stored issue is a no-op.
    let mut pending = Vec::new();
    for path in files {
        let file_name = issue_file_name(&path);
        if db::issue_exists(conn, &file_name)? {
            counts.skipped += 1;
            continue;
        }
        pending.push((file_name, path));
        if let Some(n) = limit {
            if pending.len() >= n {
                break;
            }
        }
    }
    if pending.is_empty() {
        return Ok(counts);
    }

    info!("Structuring {} issue files...", pending.len());
    let pb = ProgressBar::new(pending.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec})")?
            .progress_chars("=> "),
    );

    for batch in pending.chunks(64) {
        let results: Vec<Result<(String, parser::IssueStructure)>> = batch
            .par_iter()
            .map(|(file_name, path)| {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Ok((file_name.clone(), parser::structure_issue(&raw)))
            })
            .collect();

        for result in results {
            // Issues are isolated: an unreadable file is logged and the
            // rest of the batch keeps going.
            let (file_name, structure) = match result {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("skipping issue: {:#}", e);
                    counts.errors += 1;
                    pb.inc(1);
                    continue;
                }
            };
            for diagnostic in &structure.diagnostics {
                warn!("{}: {}", file_name, diagnostic);
            }
            db::save_issue(
                conn,
                &file_name,
                &structure.documents,
                structure.diagnostics.len(),
            )?;
            counts.issues += 1;
            counts.documents += structure.documents.len();
            counts.diagnostics += structure.diagnostics.len();
            pb.inc(1);
        }
    }

    pb.finish_and_clear();
    Ok(counts)
}

/// Derive and store chunks for every document that has none.
fn chunk_documents(conn: &rusqlite::Connection, limit: Option<usize>) -> Result<usize> {
    let stored = db::fetch_unchunked(conn, limit)?;
    if stored.is_empty() {
        println!("No unchunked documents. Run 'parse' first.");
        return Ok(0);
    }

    let mut saved = 0;
    for doc in &stored {
        let chunks = chunker::chunk_document(&doc.document);
        saved += db::save_chunks(conn, doc.id, &chunks)?;
    }
    Ok(saved)
}

fn collect_issue_files(input: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if input.is_file() {
        files.push(input.to_path_buf());
        return Ok(files);
    }
    for entry in std::fs::read_dir(input)
        .with_context(|| format!("listing {}", input.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(collect_issue_files(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    Ok(files)
}

fn issue_file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
