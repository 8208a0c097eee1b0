//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric variable could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A numeric variable parsed but is outside its valid range.
    #[error("invalid {name}='{value}': must be greater than zero")]
    OutOfRange { name: &'static str, value: String },

    /// The remote model has no known dimension and none was configured.
    #[error(
        "unknown dimension for embedding model '{model}': set {var} to the model's output size"
    )]
    UnknownModelDimension { model: String, var: &'static str },
}
