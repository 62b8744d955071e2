//! Docket Infer — embedding capability behind the `EmbedderBackend` seam.
//!
//! The matcher only ever sees the trait. `HashingEmbedder` is the offline
//! default: a deterministic token-hash projection that gives identical
//! input identical vectors and token overlap a real cosine signal.
//! `CachedEmbedder` wraps any backend with an LRU cache so repeated
//! lookups against an unchanged corpus stop re-embedding every label.

pub mod cache;
pub mod embedder;
pub mod similarity;

pub use cache::CachedEmbedder;
pub use embedder::{EmbedderBackend, EmbeddingResult, HashingEmbedder};
pub use similarity::cosine_similarity;
