use async_openai::{
    Client,
    config::OpenAIConfig,
    types::embeddings::{CreateEmbeddingRequest, EmbeddingInput},
};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

use crate::config::Config;
use crate::embed::{Embedder, Embedding};
use crate::{Error, Result};

/// Remote embedder backed by the OpenAI embeddings API.
///
/// The whole batch is sent as a single request. The HTTP client is async, so the
/// embedder owns a current-thread runtime and blocks on each call.
pub struct OpenAiEmbedder {
    client: Client<OpenAIConfig>,
    runtime: Runtime,
    model: String,
    dimension: usize,
    request_dimensions: Option<u32>,
}

impl OpenAiEmbedder {
    /// Create a remote embedder from configuration.
    ///
    /// Fails with [`Error::MissingCredential`] when `OPENAI_API_KEY` is not set.
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .openai_api_key
            .clone()
            .ok_or(Error::MissingCredential {
                var: Config::ENV_OPENAI_API_KEY,
            })?;
        let dimension = config.openai_dimension()?;

        let mut openai = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base) = &config.openai_base_url {
            openai = openai.with_api_base(base.clone());
        }

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::ProviderUnavailable {
                provider: "remote",
                reason: format!("failed to start async runtime: {e}"),
                remedy: "Use the local provider (--backend local).".to_string(),
            })?;

        info!(model = %config.openai_model, dimension, "using remote embedding model");

        Ok(Self {
            client: Client::with_config(openai),
            runtime,
            model: config.openai_model.clone(),
            dimension,
            request_dimensions: config.openai_dimensions.and_then(|d| u32::try_from(d).ok()),
        })
    }
}

impl Embedder for OpenAiEmbedder {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&mut self, texts: &[&str]) -> Result<Vec<Embedding>> {
        let request = CreateEmbeddingRequest {
            model: self.model.clone(),
            input: EmbeddingInput::StringArray(texts.iter().map(|t| t.to_string()).collect()),
            encoding_format: None,
            dimensions: self.request_dimensions,
            user: None,
        };

        debug!(count = texts.len(), model = %self.model, "requesting remote embeddings");

        let response = self
            .runtime
            .block_on(self.client.embeddings().create(request))
            .map_err(|e| Error::Embedding(format!("OpenAI API error: {e}")))?;

        let mut data = response.data;
        data.sort_by_key(|d| d.index);
        let vectors: Vec<Embedding> = data.into_iter().map(|d| d.embedding).collect();

        check_batch(&vectors, texts.len(), self.dimension)?;
        Ok(vectors)
    }
}

/// The API must answer with one vector of the configured size per input.
fn check_batch(vectors: &[Embedding], expected_count: usize, dimension: usize) -> Result<()> {
    if vectors.len() != expected_count {
        return Err(Error::Embedding(format!(
            "expected {expected_count} embeddings, API returned {}",
            vectors.len()
        )));
    }

    if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
        return Err(Error::DimensionMismatch {
            expected: dimension,
            actual: bad.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key() -> Config {
        Config {
            openai_api_key: Some("sk-test".to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn test_new_without_key() {
        let err = OpenAiEmbedder::new(&Config::default()).err().unwrap();
        assert!(matches!(err, Error::MissingCredential { .. }));
    }

    #[test]
    fn test_new_with_key_uses_default_model() {
        let embedder = OpenAiEmbedder::new(&config_with_key()).unwrap();

        assert_eq!(embedder.model_name(), "text-embedding-3-small");
        assert_eq!(embedder.dimension(), 1536);
        assert_eq!(embedder.request_dimensions, None);
    }

    #[test]
    fn test_new_with_unknown_model() {
        let config = Config {
            openai_model: "house-embedder".to_string(),
            ..config_with_key()
        };

        let err = OpenAiEmbedder::new(&config).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_requested_dimensions_are_forwarded() {
        let config = Config {
            openai_dimensions: Some(512),
            ..config_with_key()
        };

        let embedder = OpenAiEmbedder::new(&config).unwrap();
        assert_eq!(embedder.dimension(), 512);
        assert_eq!(embedder.request_dimensions, Some(512));
    }

    #[test]
    fn test_check_batch() {
        let ok = vec![vec![0.0; 3], vec![1.0; 3]];
        assert!(check_batch(&ok, 2, 3).is_ok());

        let err = check_batch(&ok, 3, 3).unwrap_err();
        assert!(matches!(err, Error::Embedding(_)));

        let ragged = vec![vec![0.0; 3], vec![1.0; 2]];
        let err = check_batch(&ragged, 2, 3).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    #[ignore] // Requires OPENAI_API_KEY and network access
    fn test_embed_preserves_order() {
        let config = Config::from_env().unwrap();
        let mut embedder = OpenAiEmbedder::new(&config).expect("OPENAI_API_KEY not set");

        let vectors = embedder
            .embed(&["credit risk", "tableau dashboards", "credit risk"])
            .unwrap();

        assert_eq!(vectors.len(), 3);
        assert_eq!(vectors[0].len(), embedder.dimension());
        let same = crate::score::cosine_similarity(&vectors[0], &vectors[2]);
        assert!(same > 0.99);
    }
}
