//! Corpus assembly across source documents.
//!
//! Each document is parsed independently and the results concatenated in
//! source order; a case never spans two documents. The corpus is rebuilt
//! fresh on every load — records carry no identity across runs.

use std::path::Path;

use docket_core::{CaseRecord, Error, Result};
use tracing::{info, warn};

use crate::parse::DocumentParser;
use crate::reader::{read_lines, FileType};

/// Parse a single source document into case records.
///
/// The document's filename becomes each record's `source_id`.
pub fn load_document(path: &Path) -> Result<Vec<CaseRecord>> {
    let lines = read_lines(path)?;
    let source_id = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();
    Ok(DocumentParser::parse(source_id, lines))
}

/// Load every case document in a directory into one corpus.
///
/// Picks up supported files whose name starts with `case`
/// (case-insensitive), sorted by filename so source order is
/// deterministic. An unreadable individual file is skipped with a
/// warning; a missing directory is `SourceUnavailable`.
pub fn load_corpus(dir: &Path) -> Result<Vec<CaseRecord>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        Error::SourceUnavailable(format!("cannot read case directory {}: {}", dir.display(), e))
    })?;

    let mut paths: Vec<_> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_case_document(p))
        .collect();
    paths.sort();

    let mut corpus = Vec::new();
    for path in &paths {
        match load_document(path) {
            Ok(records) => corpus.extend(records),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    info!("Loaded {} cases from {}", corpus.len(), dir.display());
    Ok(corpus)
}

fn is_case_document(path: &Path) -> bool {
    let named_case = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_lowercase().starts_with("case"))
        .unwrap_or(false);
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    named_case && FileType::from_extension(ext).is_supported()
}
