//! LRU embedding cache.
//!
//! Embedding is deterministic for identical text, so entries never go
//! stale; the cache only bounds memory. Fill happens under a single lock
//! acquisition, so a reader never observes a partially written entry.

use std::collections::HashMap;

use ndarray::Array1;
use parking_lot::Mutex;

use crate::embedder::{EmbedderBackend, EmbeddingResult};

struct LruStore {
    entries: HashMap<String, Array1<f32>>,
    order: Vec<String>,
    capacity: usize,
}

impl LruStore {
    fn get(&mut self, text: &str) -> Option<Array1<f32>> {
        let embedding = self.entries.get(text)?.clone();
        if let Some(pos) = self.order.iter().position(|k| k == text) {
            let key = self.order.remove(pos);
            self.order.push(key);
        }
        Some(embedding)
    }

    fn put(&mut self, text: String, embedding: Array1<f32>) {
        if self.entries.insert(text.clone(), embedding).is_some() {
            self.order.retain(|k| k != &text);
        } else {
            while self.entries.len() > self.capacity && !self.order.is_empty() {
                let oldest = self.order.remove(0);
                self.entries.remove(&oldest);
            }
        }
        self.order.push(text);
    }
}

/// Caching decorator around any embedding backend.
pub struct CachedEmbedder<E> {
    inner: E,
    store: Mutex<LruStore>,
}

impl<E: EmbedderBackend> CachedEmbedder<E> {
    /// Wrap a backend with an LRU cache of `capacity` entries.
    pub fn new(inner: E, capacity: usize) -> Self {
        Self {
            inner,
            store: Mutex::new(LruStore {
                entries: HashMap::with_capacity(capacity),
                order: Vec::with_capacity(capacity),
                capacity,
            }),
        }
    }

    /// Number of cached embeddings.
    pub fn len(&self) -> usize {
        self.store.lock().entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: EmbedderBackend> EmbedderBackend for CachedEmbedder<E> {
    fn embed(&self, text: &str) -> Option<EmbeddingResult> {
        if let Some(embedding) = self.store.lock().get(text) {
            return Some(EmbeddingResult {
                embedding,
                cached: true,
            });
        }

        let result = self.inner.embed(text)?;
        self.store
            .lock()
            .put(text.to_string(), result.embedding.clone());
        Some(result)
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }
}
