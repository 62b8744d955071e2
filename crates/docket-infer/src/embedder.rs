//! Embedding backend trait and the offline hashing implementation.

use ndarray::Array1;
use sha2::{Digest, Sha256};

/// Result of an embedding operation.
pub struct EmbeddingResult {
    /// Float32 embedding vector.
    pub embedding: Array1<f32>,
    /// Whether this was served from cache.
    pub cached: bool,
}

/// Trait for embedding backends.
///
/// Identical input text must map to an identical vector. `None` signals
/// the capability is unavailable; callers degrade to lexical-only
/// matching rather than failing.
pub trait EmbedderBackend: Send + Sync {
    /// Generate an embedding for a text string.
    fn embed(&self, text: &str) -> Option<EmbeddingResult>;

    /// Generate embeddings for a batch of texts, order-preserving.
    fn embed_batch(&self, texts: &[&str]) -> Vec<Option<EmbeddingResult>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Get the embedding dimension.
    fn dimension(&self) -> usize;

    /// Check if the embedder can produce vectors at all.
    fn is_available(&self) -> bool;
}

/// Deterministic token-hash projection embedder.
///
/// Each lowercased token is hashed to a pseudo-random unit-scale vector
/// and the token vectors are summed and normalized. Shared tokens between
/// two texts therefore produce genuine cosine similarity, which is enough
/// signal to run the whole pipeline without a model service.
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    fn token_vector(&self, token: &str) -> Array1<f32> {
        let digest = Sha256::digest(token.as_bytes());
        let mut state = u64::from_le_bytes(digest[..8].try_into().unwrap()) | 1;

        let mut values = Vec::with_capacity(self.dim);
        for _ in 0..self.dim {
            // xorshift64* keeps the projection cheap and reproducible.
            state ^= state >> 12;
            state ^= state << 25;
            state ^= state >> 27;
            let sample = state.wrapping_mul(0x2545_f491_4f6c_dd1d);
            values.push((sample >> 40) as f32 / 8_388_608.0 - 1.0);
        }
        Array1::from_vec(values)
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }
}

impl EmbedderBackend for HashingEmbedder {
    fn embed(&self, text: &str) -> Option<EmbeddingResult> {
        let mut sum = Array1::<f32>::zeros(self.dim);
        for token in Self::tokenize(text) {
            sum += &self.token_vector(&token);
        }

        let norm = sum.dot(&sum).sqrt();
        let embedding = if norm > 0.0 { sum / norm } else { sum };

        Some(EmbeddingResult {
            embedding,
            cached: false,
        })
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn is_available(&self) -> bool {
        true
    }
}
