//! Text embedding providers
//!
//! Two interchangeable providers sit behind the [`Embedder`] trait:
//!
//! - `local`: sentence-transformers/all-MiniLM-L6-v2 via fastembed (ONNX runtime).
//!   No network after the first model download, 384 dimensions.
//! - `remote`: OpenAI embeddings API, `text-embedding-3-small` by default.
//!   Requires `OPENAI_API_KEY`, 1536 dimensions.
//!
//! Each provider is behind a cargo feature of the same name. Selecting a provider
//! that was compiled out fails with [`Error::ProviderUnavailable`](crate::Error::ProviderUnavailable).
//!
//! # Usage
//!
//! ```ignore
//! use jdrank_lib::{config::Config, embed::{build_embedder, ProviderKind}};
//!
//! let mut embedder = build_embedder(ProviderKind::Local, &Config::from_env()?)?;
//! let vectors = embedder.embed(&["Risk analyst...", "Data analyst..."])?;
//! ```

use std::fmt;

use crate::config::Config;
use crate::Result;

/// A vector embedding - fixed size array of floats
pub type Embedding = Vec<f32>;

/// Trait for text embedding providers
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts.
    ///
    /// Returns one vector per input, in input order, all of the same length.
    fn embed(&mut self, texts: &[&str]) -> Result<Vec<Embedding>>;

    /// Returns the embedding dimension
    fn dimension(&self) -> usize;

    /// Returns the model name/identifier
    fn model_name(&self) -> &str;
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn embed(&mut self, texts: &[&str]) -> Result<Vec<Embedding>> {
        (**self).embed(texts)
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Which embedding provider to use for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Local,
    Remote,
}

impl ProviderKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construct the embedder for `kind`.
pub fn build_embedder(kind: ProviderKind, config: &Config) -> Result<Box<dyn Embedder>> {
    match kind {
        ProviderKind::Local => build_local(config),
        ProviderKind::Remote => build_remote(config),
    }
}

#[cfg(feature = "local")]
fn build_local(config: &Config) -> Result<Box<dyn Embedder>> {
    Ok(Box::new(LocalEmbedder::new(config)?))
}

#[cfg(not(feature = "local"))]
fn build_local(_config: &Config) -> Result<Box<dyn Embedder>> {
    Err(compiled_out(ProviderKind::Local))
}

#[cfg(feature = "remote")]
fn build_remote(config: &Config) -> Result<Box<dyn Embedder>> {
    Ok(Box::new(OpenAiEmbedder::new(config)?))
}

#[cfg(not(feature = "remote"))]
fn build_remote(_config: &Config) -> Result<Box<dyn Embedder>> {
    Err(compiled_out(ProviderKind::Remote))
}

#[cfg(any(not(feature = "local"), not(feature = "remote")))]
fn compiled_out(kind: ProviderKind) -> crate::Error {
    crate::Error::ProviderUnavailable {
        provider: kind.as_str(),
        reason: "support was not compiled into this build".to_string(),
        remedy: format!(
            "Rebuild with `cargo install jdrank-cli --features {kind}`, or choose the other provider."
        ),
    }
}

#[cfg(feature = "local")]
mod local;
#[cfg(feature = "local")]
pub use local::*;

#[cfg(feature = "remote")]
mod openai;
#[cfg(feature = "remote")]
pub use openai::*;

#[cfg(test)]
pub(crate) mod fake;
