//! Deterministic embedder for tests.

use std::collections::HashMap;

use crate::embed::{Embedder, Embedding};
use crate::Result;

/// Returns a fixed vector per known text and a default vector otherwise.
///
/// Counts calls so tests can assert that a run issues exactly one batch.
pub(crate) struct StaticEmbedder {
    dimension: usize,
    vectors: HashMap<String, Embedding>,
    fallback: Embedding,
    pub calls: usize,
    pub last_batch: Vec<String>,
}

impl StaticEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: HashMap::new(),
            fallback: vec![0.0; dimension],
            calls: 0,
            last_batch: Vec::new(),
        }
    }

    pub fn with(mut self, text: &str, vector: Embedding) -> Self {
        self.vectors.insert(text.to_string(), vector);
        self
    }

    pub fn with_fallback(mut self, vector: Embedding) -> Self {
        self.fallback = vector;
        self
    }
}

impl Embedder for StaticEmbedder {
    fn embed(&mut self, texts: &[&str]) -> Result<Vec<Embedding>> {
        self.calls += 1;
        self.last_batch = texts.iter().map(|t| t.to_string()).collect();

        Ok(texts
            .iter()
            .map(|t| self.vectors.get(*t).cloned().unwrap_or_else(|| self.fallback.clone()))
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "static"
    }
}
