//! Hybrid matcher — dense semantic similarity with lexical fallback.

use std::sync::Arc;

use docket_core::{CaseRecord, MatchThresholds};
use docket_infer::{cosine_similarity, EmbedderBackend};
use ndarray::Array1;
use rapidfuzz::fuzz;
use tracing::{debug, warn};

use crate::types::{MatchBasis, MatchDecision, RankedCase};

/// Per-record scores gathered during a single-best-match pass.
/// Transient; never leaves the matcher.
struct MatchCandidate {
    record_index: usize,
    /// Cosine similarity in [-1, 1]; `None` if the label could not be embedded.
    semantic_score: Option<f32>,
    /// Partial-ratio similarity in [0, 100].
    lexical_score: f64,
}

/// Hybrid matcher over a parsed corpus.
pub struct HybridMatcher {
    embedder: Arc<dyn EmbedderBackend>,
    thresholds: MatchThresholds,
}

impl HybridMatcher {
    pub fn new(embedder: Arc<dyn EmbedderBackend>, thresholds: MatchThresholds) -> Self {
        Self {
            embedder,
            thresholds,
        }
    }

    /// Find the single best case for a client-name query.
    ///
    /// Decision order: the semantically closest label wins if its cosine
    /// score clears the semantic threshold, even when a different record
    /// would be the tighter lexical match — that precedence is policy,
    /// not an accident. Otherwise the lexically closest label wins if it
    /// clears the lexical threshold. Otherwise there is no match.
    ///
    /// Empty query or empty corpus short-circuits to `None` before any
    /// embedding call. Ties break toward the lowest record index.
    pub fn match_client(&self, query: &str, corpus: &[CaseRecord]) -> Option<MatchDecision> {
        let query = query.trim();
        if query.is_empty() || corpus.is_empty() {
            return None;
        }

        let candidates = self.score_labels(query, corpus);

        let best_semantic = candidates
            .iter()
            .filter_map(|c| c.semantic_score.map(|s| (c.record_index, s)))
            .fold(None::<(usize, f32)>, |best, (idx, score)| match best {
                Some((_, best_score)) if score <= best_score => best,
                _ => Some((idx, score)),
            });

        if let Some((index, score)) = best_semantic {
            if score > self.thresholds.semantic {
                debug!("Semantic match at index {} (cosine {:.3})", index, score);
                return Some(MatchDecision {
                    record_index: index,
                    basis: MatchBasis::Semantic,
                    semantic_score: Some(score),
                    lexical_score: candidates[index].lexical_score,
                });
            }
        }

        let best_lexical = candidates
            .iter()
            .fold(None::<(usize, f64)>, |best, c| match best {
                Some((_, best_score)) if c.lexical_score <= best_score => best,
                _ => Some((c.record_index, c.lexical_score)),
            });

        if let Some((index, score)) = best_lexical {
            if score > self.thresholds.lexical {
                debug!("Lexical match at index {} (ratio {:.1})", index, score);
                return Some(MatchDecision {
                    record_index: index,
                    basis: MatchBasis::Lexical,
                    semantic_score: candidates[index].semantic_score,
                    lexical_score: score,
                });
            }
        }

        debug!("No case cleared either threshold for {:?}", query);
        None
    }

    /// Rank the corpus against a free-text query, best first, up to `k`.
    ///
    /// Ranking embeds the wider label + summary text, since free-text
    /// legal queries rarely mention the client name verbatim. Empty
    /// query, empty corpus, or k = 0 yields an empty ranking without
    /// touching the embedder.
    pub fn rank(&self, query: &str, corpus: &[CaseRecord], k: usize) -> Vec<RankedCase> {
        let query = query.trim();
        if query.is_empty() || corpus.is_empty() || k == 0 {
            return Vec::new();
        }

        let query_embedding = match self.embed(query) {
            Some(v) => v,
            None => {
                warn!("Embedding capability unavailable; ranking returns no results");
                return Vec::new();
            }
        };

        let texts: Vec<String> = corpus.iter().map(|r| r.ranking_text()).collect();
        let text_refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let embeddings = self.embedder.embed_batch(&text_refs);

        let mut ranked: Vec<RankedCase> = embeddings
            .into_iter()
            .enumerate()
            .filter_map(|(index, result)| {
                result.map(|r| RankedCase {
                    record_index: index,
                    score: cosine_similarity(&query_embedding, &r.embedding),
                })
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.record_index.cmp(&b.record_index))
        });
        ranked.truncate(k);
        ranked
    }

    /// Score every label both ways. The semantic pass is skipped wholesale
    /// when the embedding capability is unavailable; matching then degrades
    /// to the lexical rule alone.
    fn score_labels(&self, query: &str, corpus: &[CaseRecord]) -> Vec<MatchCandidate> {
        let query_lower = query.to_lowercase();
        let query_embedding = if self.embedder.is_available() {
            self.embed(query)
        } else {
            None
        };

        corpus
            .iter()
            .enumerate()
            .map(|(record_index, record)| {
                let semantic_score = query_embedding.as_ref().and_then(|q| {
                    self.embed(&record.client_label)
                        .map(|label| cosine_similarity(q, &label))
                });
                let lexical_score = partial_ratio(&query_lower, &record.client_label.to_lowercase());
                MatchCandidate {
                    record_index,
                    semantic_score,
                    lexical_score,
                }
            })
            .collect()
    }

    fn embed(&self, text: &str) -> Option<Array1<f32>> {
        self.embedder.embed(text).map(|r| r.embedding)
    }
}

/// Partial-ratio fuzzy similarity on a 0-100 scale.
///
/// `fuzz::ratio` scores whole strings on [0, 1]. The partial variant
/// slides the shorter string across every same-length window of the
/// longer one and keeps the best alignment, so a bare client name
/// scores 100 against any label that contains it verbatim.
fn partial_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (needle, haystack) = if a_chars.len() <= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };
    if needle.is_empty() {
        return 0.0;
    }

    let mut best = 0.0f64;
    for window in haystack.windows(needle.len()) {
        let score = fuzz::ratio(needle.iter().copied(), window.iter().copied());
        if score > best {
            best = score;
        }
    }
    best * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_infer::{EmbeddingResult, HashingEmbedder};

    fn record(label: &str, summary: &str) -> CaseRecord {
        CaseRecord {
            client_label: label.into(),
            charges: Vec::new(),
            summary: summary.into(),
            source_id: "case1.txt".into(),
        }
    }

    fn matcher() -> HybridMatcher {
        HybridMatcher::new(Arc::new(HashingEmbedder::new(384)), MatchThresholds::default())
    }

    fn corpus() -> Vec<CaseRecord> {
        vec![
            record("Ravi Kumar v. State", "Convicted under Section 302 for murder."),
            record("Meena v. Union of India", "Dowry harassment, life imprisonment."),
            record("Acme Corp v. Tax Board", "Corporate tax evasion dispute."),
        ]
    }

    /// Embedder that panics if touched — proves short-circuit paths.
    struct PanicEmbedder;

    impl EmbedderBackend for PanicEmbedder {
        fn embed(&self, _text: &str) -> Option<EmbeddingResult> {
            panic!("embedder must not be invoked");
        }
        fn dimension(&self) -> usize {
            384
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    /// Embedder that reports itself unavailable.
    struct OfflineEmbedder;

    impl EmbedderBackend for OfflineEmbedder {
        fn embed(&self, _text: &str) -> Option<EmbeddingResult> {
            None
        }
        fn dimension(&self) -> usize {
            384
        }
        fn is_available(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_partial_ratio_is_0_to_100_with_substring_alignment() {
        // Contained verbatim: perfect alignment regardless of label length.
        assert_eq!(partial_ratio("meena", "meena v. union of india"), 100.0);
        assert_eq!(partial_ratio("sharma v. state", "sharma v. state"), 100.0);
        // One substituted character in a ten-character name still clears
        // the default lexical threshold.
        let near = partial_ratio("ravi kumer", "ravi kumar v. state");
        assert!(near > 80.0 && near < 100.0);
        // Unrelated text lands low on the same scale.
        assert!(partial_ratio("zzzzzqqqqq", "meena v. union of india") < 50.0);
        assert_eq!(partial_ratio("", "meena v. union of india"), 0.0);
    }

    #[test]
    fn test_semantic_match_on_client_name() {
        let decision = matcher().match_client("Ravi Kumar", &corpus()).unwrap();
        assert_eq!(decision.record_index, 0);
        assert_eq!(decision.basis, MatchBasis::Semantic);
        assert!(decision.semantic_score.unwrap() > 0.6);
    }

    #[test]
    fn test_nonsense_query_matches_nothing() {
        assert!(matcher()
            .match_client("xyz-nonsense-query", &corpus())
            .is_none());
    }

    #[test]
    fn test_lexical_fallback_when_embedder_unavailable() {
        let matcher =
            HybridMatcher::new(Arc::new(OfflineEmbedder), MatchThresholds::default());
        let decision = matcher.match_client("Meena", &corpus()).unwrap();
        assert_eq!(decision.record_index, 1);
        assert_eq!(decision.basis, MatchBasis::Lexical);
        assert!(decision.semantic_score.is_none());
        assert!(decision.lexical_score > 80.0);
    }

    #[test]
    fn test_thresholds_are_configuration() {
        // An impossible semantic threshold forces the lexical rule even
        // though the semantic pass ran.
        let matcher = HybridMatcher::new(
            Arc::new(HashingEmbedder::new(384)),
            MatchThresholds {
                semantic: 1.1,
                lexical: 80.0,
            },
        );
        let decision = matcher.match_client("Ravi Kumar", &corpus()).unwrap();
        assert_eq!(decision.basis, MatchBasis::Lexical);
        assert_eq!(decision.record_index, 0);
        assert!(decision.semantic_score.is_some());
    }

    #[test]
    fn test_ties_break_to_lowest_index() {
        let corpus = vec![
            record("Sharma v. State", ""),
            record("Sharma v. State", ""),
        ];
        let decision = matcher().match_client("Sharma", &corpus).unwrap();
        assert_eq!(decision.record_index, 0);
    }

    #[test]
    fn test_empty_query_short_circuits_before_embedding() {
        let matcher = HybridMatcher::new(Arc::new(PanicEmbedder), MatchThresholds::default());
        assert!(matcher.match_client("", &corpus()).is_none());
        assert!(matcher.match_client("   ", &corpus()).is_none());
        assert!(matcher.rank("", &corpus(), 3).is_empty());
    }

    #[test]
    fn test_empty_corpus_short_circuits_before_embedding() {
        let matcher = HybridMatcher::new(Arc::new(PanicEmbedder), MatchThresholds::default());
        assert!(matcher.match_client("Ravi Kumar", &[]).is_none());
        assert!(matcher.rank("dowry case", &[], 3).is_empty());
    }

    #[test]
    fn test_rank_returns_min_k_sorted_unique() {
        let ranked = matcher().rank("Who got life imprisonment for dowry?", &corpus(), 3);
        assert_eq!(ranked.len(), 3);

        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        let mut indices: Vec<_> = ranked.iter().map(|r| r.record_index).collect();
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), 3);

        // The dowry case shares query tokens through its summary.
        assert_eq!(ranked[0].record_index, 1);
    }

    #[test]
    fn test_rank_truncates_to_corpus_size() {
        let ranked = matcher().rank("tax dispute", &corpus(), 10);
        assert_eq!(ranked.len(), 3);
    }
}
