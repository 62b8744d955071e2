//! The unit of retrieval: one structured legal case.

use serde::{Deserialize, Serialize};

/// A structured case record extracted from raw document text.
///
/// Records are immutable once the parser finalizes them: the parser owns
/// the only mutable form (its open accumulator) and hands out finished
/// values. A corpus is rebuilt fresh on every parse, so records carry no
/// identity across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Canonical identifying line, typically "<party> v. <party>".
    /// Always non-empty for records in a parsed corpus.
    pub client_label: String,
    /// Charges parsed from delimiter-separated clauses, in document order.
    #[serde(default)]
    pub charges: Vec<String>,
    /// Free narrative text used for semantic retrieval. May be empty.
    #[serde(default)]
    pub summary: String,
    /// Originating document (filename or equivalent). Provenance only,
    /// never used for matching.
    pub source_id: String,
}

impl CaseRecord {
    /// Charges joined for display, e.g. "Section 302, Section 34".
    pub fn charges_line(&self) -> String {
        self.charges.join(", ")
    }

    /// The wider text used in ranking mode: label plus summary.
    pub fn ranking_text(&self) -> String {
        if self.summary.is_empty() {
            self.client_label.clone()
        } else {
            format!("{}: {}", self.client_label, self.summary)
        }
    }
}
