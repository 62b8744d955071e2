//! Configuration for corpus location and match thresholds.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Confidence thresholds for the hybrid matcher.
///
/// The two scales are intentionally asymmetric: `semantic` is cosine
/// similarity in [-1, 1], `lexical` is a partial-ratio score in [0, 100].
/// Both were tuned empirically, so they are configuration rather than
/// constants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchThresholds {
    /// Minimum cosine similarity for a semantic match (exclusive).
    #[serde(default = "default_semantic")]
    pub semantic: f32,
    /// Minimum partial-ratio score for a lexical match (exclusive).
    #[serde(default = "default_lexical")]
    pub lexical: f64,
}

fn default_semantic() -> f32 {
    0.6
}

fn default_lexical() -> f64 {
    80.0
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            semantic: default_semantic(),
            lexical: default_lexical(),
        }
    }
}

/// Top-level Docket configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocketConfig {
    /// Directory scanned for case documents.
    pub cases_dir: PathBuf,
    /// Embedding dimension (384 for all-MiniLM-L6-v2 class models).
    pub embedding_dim: usize,
    /// Default result count for query-mode ranking.
    pub top_k: usize,
    /// Hybrid matcher thresholds.
    #[serde(default)]
    pub thresholds: MatchThresholds,
}

impl DocketConfig {
    /// Create configuration from environment and defaults.
    ///
    /// `DOCKET_SEMANTIC_THRESHOLD` and `DOCKET_LEXICAL_THRESHOLD` override
    /// the matcher thresholds; `DOCKET_TOP_K` overrides the ranking depth.
    pub fn from_env(cases_dir: impl AsRef<Path>) -> Self {
        let semantic = std::env::var("DOCKET_SEMANTIC_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_semantic);
        let lexical = std::env::var("DOCKET_LEXICAL_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_lexical);
        let top_k = std::env::var("DOCKET_TOP_K")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        Self {
            cases_dir: cases_dir.as_ref().to_path_buf(),
            embedding_dim: 384,
            top_k,
            thresholds: MatchThresholds { semantic, lexical },
        }
    }
}
