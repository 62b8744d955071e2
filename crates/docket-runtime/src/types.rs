//! Runtime response types.

use docket_core::CaseRecord;
use serde::Serialize;

/// Display form of one matched case.
#[derive(Debug, Clone, Serialize)]
pub struct CaseBrief {
    pub client_label: String,
    /// Charges joined for display.
    pub charges: String,
    pub summary: String,
    pub source_id: String,
}

impl From<&CaseRecord> for CaseBrief {
    fn from(record: &CaseRecord) -> Self {
        Self {
            client_label: record.client_label.clone(),
            charges: record.charges_line(),
            summary: record.summary.clone(),
            source_id: record.source_id.clone(),
        }
    }
}

/// Result of a client-name lookup.
#[derive(Debug, Clone, Serialize)]
pub struct ClientLookup {
    /// User-visible status line; always populated.
    pub status: String,
    /// The matched case, if any rule cleared its threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<CaseBrief>,
    /// Plain-language rewrite of the summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simplified: Option<String>,
    /// Suggested next legal steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<String>,
    /// Answer to the optional follow-up question.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl ClientLookup {
    pub fn status_only(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            case: None,
            simplified: None,
            suggestions: None,
            answer: None,
        }
    }
}

/// One ranked hit of a free-text query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryHit {
    pub case: CaseBrief,
    /// Cosine similarity against the query.
    pub score: f32,
    /// Plain-language rewrite of this hit's summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simplified: Option<String>,
}

/// Result of a free-text query lookup.
#[derive(Debug, Clone, Serialize)]
pub struct QueryLookup {
    /// User-visible status line; always populated.
    pub status: String,
    pub hits: Vec<QueryHit>,
    /// Combined answer generated over all hit summaries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl QueryLookup {
    pub fn status_only(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            hits: Vec::new(),
            answer: None,
        }
    }
}
