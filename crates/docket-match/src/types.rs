//! Matcher types.

use serde::Serialize;

/// Which decision rule selected a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchBasis {
    /// Cosine similarity of embeddings cleared its threshold.
    Semantic,
    /// Partial-ratio fuzzy similarity cleared its threshold.
    Lexical,
}

/// Outcome of a single-best-match query.
#[derive(Debug, Clone, Serialize)]
pub struct MatchDecision {
    /// Index of the matched record in the corpus.
    pub record_index: usize,
    /// Rule that fired.
    pub basis: MatchBasis,
    /// Cosine score of the matched record; `None` when the semantic pass
    /// was skipped because the embedding capability was unavailable.
    pub semantic_score: Option<f32>,
    /// Partial-ratio score of the matched record, 0–100.
    pub lexical_score: f64,
}

/// One entry of a top-k ranking.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCase {
    /// Index of the record in the corpus.
    pub record_index: usize,
    /// Cosine similarity against the record's label + summary text.
    pub score: f32,
}
