//! Docket Match — hybrid semantic + lexical case matching.
//!
//! Two retrieval modes over one corpus: single-best-match against client
//! labels (`match_client`) and top-k ranking against label + summary text
//! (`rank`). Semantic similarity is authoritative whenever it clears its
//! threshold; lexical fuzzy matching is the fallback rule.

pub mod hybrid;
pub mod types;

pub use hybrid::HybridMatcher;
pub use types::{MatchBasis, MatchDecision, RankedCase};
