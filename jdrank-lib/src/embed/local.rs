use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::{debug, info};

use crate::config::Config;
use crate::embed::{Embedder, Embedding};
use crate::{Error, Result};

/// Local embedder using sentence-transformers/all-MiniLM-L6-v2.
///
/// Uses fastembed for ONNX-based inference. This model produces 384-dimensional
/// embeddings and needs no network access once the model is cached.
pub struct LocalEmbedder {
    model: TextEmbedding,
}

impl LocalEmbedder {
    pub const MODEL_NAME: &'static str = "sentence-transformers/all-MiniLM-L6-v2";
    pub const DIMENSION: usize = 384;

    /// Create a new local embedder.
    ///
    /// Downloads the model on first use (~90MB) into the fastembed cache, or into
    /// `JDRANK_MODEL_CACHE` when set.
    pub fn new(config: &Config) -> Result<Self> {
        let mut opts = InitOptions::new(EmbeddingModel::AllMiniLML6V2)
            .with_show_download_progress(config.show_download_progress);
        if let Some(dir) = &config.model_cache {
            opts = opts.with_cache_dir(dir.clone());
        }

        info!(model = Self::MODEL_NAME, "loading local embedding model");

        TextEmbedding::try_new(opts)
            .map(|model| Self { model })
            .map_err(|e| Error::ProviderUnavailable {
                provider: "local",
                reason: e.to_string(),
                remedy: "The model is downloaded on first use; check network access and \
                         JDRANK_MODEL_CACHE, or use the remote provider (--backend remote)."
                    .to_string(),
            })
    }
}

impl Embedder for LocalEmbedder {
    fn model_name(&self) -> &str {
        Self::MODEL_NAME
    }

    fn dimension(&self) -> usize {
        Self::DIMENSION
    }

    fn embed(&mut self, texts: &[&str]) -> Result<Vec<Embedding>> {
        debug!(count = texts.len(), "embedding batch locally");

        self.model
            .embed(texts, None)
            .map_err(|e| Error::Embedding(e.to_string()))
    }
}
