//! Error types for jdrank

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for jdrank operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while classifying a job description
#[derive(Error, Debug)]
pub enum Error {
    /// The embedding provider failed or returned an unusable batch
    #[error("embedding error: {0}")]
    Embedding(String),

    /// The selected provider cannot run in this build or environment
    #[error("{provider} embedding provider is unavailable: {reason}\n{remedy}")]
    ProviderUnavailable {
        provider: &'static str,
        reason: String,
        remedy: String,
    },

    /// A credential required by the remote provider is not set
    #[error(
        "{var} environment variable is not set.\n\
         Export it or switch to the local provider (--backend local)."
    )]
    MissingCredential { var: &'static str },

    /// Vectors within one batch disagree on dimensionality
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The anchor corpus violates one of its invariants
    #[error("invalid anchor corpus: {0}")]
    InvalidAnchors(String),

    /// Failed to read an anchor corpus file
    #[error("failed to read anchor file {}: {source}", path.display())]
    AnchorFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An anchor corpus document is not valid JSON for the expected shape
    #[error("failed to parse anchor corpus {origin}: {source}")]
    AnchorParse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid input provided
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Environment configuration could not be parsed
    #[error(transparent)]
    Config(#[from] ConfigError),
}
