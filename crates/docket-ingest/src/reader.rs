//! Source document readers.
//!
//! A reader turns a document identifier into an ordered line sequence,
//! paragraph by paragraph. Failures surface as
//! `Error::SourceUnavailable` — the parser itself never sees a file.

use std::io::Read;
use std::path::Path;

use docket_core::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Supported source document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    PlainText,
    Markdown,
    Docx,
    Unknown,
}

impl FileType {
    /// Detect file type from extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" => Self::PlainText,
            "md" | "mdx" => Self::Markdown,
            "docx" => Self::Docx,
            _ => Self::Unknown,
        }
    }

    /// Whether this type can carry case text at all.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Read a source document into an ordered sequence of lines.
///
/// Blank lines are kept; the parser discards them. A missing or
/// unreadable file is `SourceUnavailable`, not a panic and not an
/// empty success.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(Error::SourceUnavailable(format!(
            "file not found: {}",
            path.display()
        )));
    }

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match FileType::from_extension(ext) {
        FileType::Docx => read_docx_lines(path),
        FileType::PlainText | FileType::Markdown => read_text_lines(path),
        FileType::Unknown => {
            // Try as text, but refuse content that is clearly binary.
            let lines = read_text_lines(path)?;
            let control_heavy = lines.iter().any(|l| {
                l.chars().filter(|c| c.is_control() && *c != '\t').count() > l.len() / 10
            });
            if control_heavy {
                Err(Error::SourceUnavailable(format!(
                    "not a text document: {}",
                    path.display()
                )))
            } else {
                Ok(lines)
            }
        }
    }
}

fn read_text_lines(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::SourceUnavailable(format!("cannot read {}: {}", path.display(), e))
    })?;
    Ok(content.lines().map(String::from).collect())
}

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Extract paragraph text from a DOCX container.
///
/// A `.docx` file is a zip archive; the document body lives in
/// `word/document.xml` with one `<w:p>` element per paragraph. Each
/// paragraph becomes one line.
fn read_docx_lines(path: &Path) -> Result<Vec<String>> {
    let file = std::fs::File::open(path).map_err(|e| {
        Error::SourceUnavailable(format!("cannot open {}: {}", path.display(), e))
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| {
        Error::SourceUnavailable(format!("not a docx container {}: {}", path.display(), e))
    })?;
    let mut entry = archive.by_name("word/document.xml").map_err(|e| {
        Error::SourceUnavailable(format!("no document body in {}: {}", path.display(), e))
    })?;

    let mut xml = String::new();
    entry.read_to_string(&mut xml).map_err(|e| {
        Error::SourceUnavailable(format!("cannot read {}: {}", path.display(), e))
    })?;

    let lines: Vec<String> = xml
        .split("</w:p>")
        .map(|para| decode_entities(&TAG_RE.replace_all(para, "")))
        .collect();

    debug!("Extracted {} paragraphs from {}", lines.len(), path.display());
    Ok(lines)
}

// `&amp;` must decode last so `&amp;lt;` stays a literal `&lt;`.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
