//! Orchestrator — wires parser, matcher, and narrator into lookup verbs.

use std::sync::Arc;

use docket_core::{CaseRecord, DocketConfig};
use docket_infer::EmbedderBackend;
use docket_match::HybridMatcher;
use docket_narrate::{prompt, with_placeholder, Narrator};
use tracing::{info, warn};

use crate::types::{CaseBrief, ClientLookup, QueryHit, QueryLookup};

/// Placeholder shown when a summary rewrite fails or no narrator is set.
pub const SIMPLIFY_PLACEHOLDER: &str = "Could not generate a simplified summary.";
/// Placeholder for the suggestions slot.
pub const SUGGESTIONS_PLACEHOLDER: &str = "Could not generate suggestions.";
/// Placeholder for the answer slot.
pub const ANSWER_PLACEHOLDER: &str = "Could not generate an answer.";
/// Shown in place of an empty case summary.
pub const NO_SUMMARY: &str = "No summary available.";

/// Coordinates one lookup request end to end.
///
/// Service handles are constructed once at process start and injected
/// here; the orchestrator itself holds no corpus state, so every request
/// re-parses the source documents and sees a fresh, consistent corpus.
pub struct Orchestrator {
    config: DocketConfig,
    embedder: Arc<dyn EmbedderBackend>,
    narrator: Option<Arc<dyn Narrator>>,
}

impl Orchestrator {
    pub fn new(config: DocketConfig, embedder: Arc<dyn EmbedderBackend>) -> Self {
        Self {
            config,
            embedder,
            narrator: None,
        }
    }

    /// Attach a narrative collaborator.
    pub fn with_narrator(mut self, narrator: Arc<dyn Narrator>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    pub fn config(&self) -> &DocketConfig {
        &self.config
    }

    /// Load the corpus from the configured case directory.
    ///
    /// An unavailable source degrades to an empty corpus plus the error
    /// as a user-visible status; it never aborts the request.
    pub fn load_corpus(&self) -> (Vec<CaseRecord>, String) {
        match docket_ingest::load_corpus(&self.config.cases_dir) {
            Ok(records) => {
                let status = format!("Loaded {} cases.", records.len());
                (records, status)
            }
            Err(e) => {
                warn!("Corpus load failed: {}", e);
                (Vec::new(), e.to_string())
            }
        }
    }

    /// Verb: look up the case that best matches a client name, with
    /// narrative slots for the matched summary.
    pub async fn lookup_client(&self, client_name: &str, question: Option<&str>) -> ClientLookup {
        let (corpus, load_status) = self.load_corpus();

        if corpus.is_empty() {
            return ClientLookup::status_only(load_status);
        }
        if client_name.trim().is_empty() {
            return ClientLookup::status_only("Please enter a client name.");
        }

        let matcher = HybridMatcher::new(self.embedder.clone(), self.config.thresholds);
        let decision = match matcher.match_client(client_name, &corpus) {
            Some(d) => d,
            None => return ClientLookup::status_only("No matching case found."),
        };

        let record = &corpus[decision.record_index];
        info!(
            "Matched {:?} to {:?} via {:?}",
            client_name, record.client_label, decision.basis
        );

        let summary = if record.summary.is_empty() {
            NO_SUMMARY.to_string()
        } else {
            record.summary.clone()
        };

        // Each narrative slot degrades independently; one collaborator
        // failure never empties the others.
        let simplified = self
            .narrate(prompt::simplify(&summary), SIMPLIFY_PLACEHOLDER)
            .await;
        let suggestions = self
            .narrate(prompt::suggestions(&summary), SUGGESTIONS_PLACEHOLDER)
            .await;
        let answer = match question.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => Some(self.narrate(prompt::answer(&summary, q), ANSWER_PLACEHOLDER).await),
            None => None,
        };

        ClientLookup {
            status: format!("Closest match: {}", record.client_label),
            case: Some(CaseBrief::from(record)),
            simplified: Some(simplified),
            suggestions: Some(suggestions),
            answer,
        }
    }

    /// Verb: rank cases against a free-text legal query and answer it
    /// from the top hits.
    pub async fn query_cases(&self, query: &str, top_k: Option<usize>) -> QueryLookup {
        let (corpus, load_status) = self.load_corpus();

        if corpus.is_empty() {
            return QueryLookup::status_only(load_status);
        }
        if query.trim().is_empty() {
            return QueryLookup::status_only("Please enter a legal query.");
        }

        let matcher = HybridMatcher::new(self.embedder.clone(), self.config.thresholds);
        let ranked = matcher.rank(query, &corpus, top_k.unwrap_or(self.config.top_k));
        if ranked.is_empty() {
            return QueryLookup::status_only("No matching cases found.");
        }

        let mut hits = Vec::with_capacity(ranked.len());
        for entry in &ranked {
            let record = &corpus[entry.record_index];
            let summary = if record.summary.is_empty() {
                NO_SUMMARY.to_string()
            } else {
                record.summary.clone()
            };
            let simplified = self
                .narrate(prompt::simplify(&summary), SIMPLIFY_PLACEHOLDER)
                .await;
            hits.push(QueryHit {
                case: CaseBrief::from(record),
                score: entry.score,
                simplified: Some(simplified),
            });
        }

        let summaries: Vec<&str> = ranked
            .iter()
            .map(|e| corpus[e.record_index].summary.as_str())
            .collect();
        let answer = self
            .narrate(prompt::answer_from_cases(&summaries, query), ANSWER_PLACEHOLDER)
            .await;

        QueryLookup {
            status: format!("Found {} matching cases.", hits.len()),
            hits,
            answer: Some(answer),
        }
    }

    /// Run one narration; without a configured narrator the slot carries
    /// the placeholder directly.
    async fn narrate(&self, prompt: String, placeholder: &str) -> String {
        match &self.narrator {
            Some(narrator) => with_placeholder(narrator.generate(&prompt).await, placeholder),
            None => placeholder.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use docket_infer::{CachedEmbedder, HashingEmbedder};
    use docket_narrate::NarrateError;
    use std::path::Path;

    /// Narrator double that echoes the first prompt line.
    struct ScriptedNarrator;

    #[async_trait]
    impl Narrator for ScriptedNarrator {
        async fn generate(&self, prompt: &str) -> Result<String, NarrateError> {
            Ok(format!("[narrated] {}", prompt.lines().next().unwrap_or("")))
        }
    }

    /// Narrator double that always fails.
    struct FailingNarrator;

    #[async_trait]
    impl Narrator for FailingNarrator {
        async fn generate(&self, _prompt: &str) -> Result<String, NarrateError> {
            Err(NarrateError::Http("connection refused".into()))
        }
    }

    fn write_fixture(dir: &Path) {
        std::fs::write(
            dir.join("case1.txt"),
            "Ravi Kumar v. State\n\
             Charges: Section 302, Section 34\n\
             Summary: Convicted of murder with common intention.\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("case2.txt"),
            "Meena v. Union of India\n\
             Charges: Section 304B\n\
             Summary: Dowry death, life imprisonment upheld on appeal.\n",
        )
        .unwrap();
    }

    fn orchestrator(dir: &Path) -> Orchestrator {
        let config = DocketConfig::from_env(dir);
        let embedder = Arc::new(CachedEmbedder::new(HashingEmbedder::new(384), 1000));
        Orchestrator::new(config, embedder)
    }

    #[test]
    fn test_load_corpus_reports_count() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let (corpus, status) = orchestrator(dir.path()).load_corpus();
        assert_eq!(corpus.len(), 2);
        assert_eq!(status, "Loaded 2 cases.");
    }

    #[test]
    fn test_load_corpus_missing_dir_degrades_to_status() {
        let orch = orchestrator(Path::new("/nonexistent/cases"));
        let (corpus, status) = orch.load_corpus();
        assert!(corpus.is_empty());
        assert!(status.contains("Source unavailable"));
    }

    #[tokio::test]
    async fn test_lookup_client_matches_and_narrates() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        let orch = orchestrator(dir.path()).with_narrator(Arc::new(ScriptedNarrator));

        let lookup = orch.lookup_client("Ravi Kumar", None).await;
        let case = lookup.case.expect("should match");
        assert_eq!(case.client_label, "Ravi Kumar v. State");
        assert_eq!(case.charges, "Section 302, Section 34");
        assert!(lookup.status.contains("Ravi Kumar v. State"));
        assert!(lookup.simplified.unwrap().starts_with("[narrated]"));
        assert!(lookup.suggestions.unwrap().starts_with("[narrated]"));
        assert!(lookup.answer.is_none());
    }

    #[tokio::test]
    async fn test_lookup_client_answers_question() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        let orch = orchestrator(dir.path()).with_narrator(Arc::new(ScriptedNarrator));

        let lookup = orch
            .lookup_client("Ravi Kumar", Some("What should I do next?"))
            .await;
        assert!(lookup.answer.unwrap().starts_with("[narrated]"));
    }

    #[tokio::test]
    async fn test_lookup_client_no_match() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let lookup = orchestrator(dir.path())
            .lookup_client("completely unrelated nonsense", None)
            .await;
        assert_eq!(lookup.status, "No matching case found.");
        assert!(lookup.case.is_none());
    }

    #[tokio::test]
    async fn test_lookup_client_empty_name() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let lookup = orchestrator(dir.path()).lookup_client("  ", None).await;
        assert_eq!(lookup.status, "Please enter a client name.");
        assert!(lookup.case.is_none());
    }

    #[tokio::test]
    async fn test_narrator_failure_substitutes_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        let orch = orchestrator(dir.path()).with_narrator(Arc::new(FailingNarrator));

        let lookup = orch.lookup_client("Ravi Kumar", Some("next steps?")).await;
        // The match itself survives collaborator failure.
        assert!(lookup.case.is_some());
        assert_eq!(lookup.simplified.unwrap(), SIMPLIFY_PLACEHOLDER);
        assert_eq!(lookup.suggestions.unwrap(), SUGGESTIONS_PLACEHOLDER);
        assert_eq!(lookup.answer.unwrap(), ANSWER_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_no_narrator_uses_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let lookup = orchestrator(dir.path()).lookup_client("Ravi Kumar", None).await;
        assert_eq!(lookup.simplified.unwrap(), SIMPLIFY_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_query_cases_ranks_and_answers() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        let orch = orchestrator(dir.path()).with_narrator(Arc::new(ScriptedNarrator));

        let lookup = orch
            .query_cases("Who got life imprisonment for dowry death?", Some(2))
            .await;
        assert_eq!(lookup.hits.len(), 2);
        assert_eq!(lookup.status, "Found 2 matching cases.");
        assert_eq!(lookup.hits[0].case.client_label, "Meena v. Union of India");
        assert!(lookup.hits[0].score >= lookup.hits[1].score);
        assert!(lookup.answer.unwrap().starts_with("[narrated]"));
    }

    #[tokio::test]
    async fn test_query_cases_empty_query() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let lookup = orchestrator(dir.path()).query_cases("", None).await;
        assert_eq!(lookup.status, "Please enter a legal query.");
        assert!(lookup.hits.is_empty());
    }

    #[tokio::test]
    async fn test_query_cases_missing_source() {
        let orch = orchestrator(Path::new("/nonexistent/cases"));
        let lookup = orch.query_cases("dowry", None).await;
        assert!(lookup.status.contains("Source unavailable"));
        assert!(lookup.hits.is_empty());
        assert!(lookup.answer.is_none());
    }
}
