//! Environment-backed configuration.
//!
//! Every setting has a default. Provider credentials and overrides are read from
//! `OPENAI_*` and `JDRANK_*` environment variables.

pub mod error;

pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

/// Temperature applied to the confidence softmax.
pub const DEFAULT_TEMPERATURE: f64 = 0.1;

/// Remote model used when `JDRANK_OPENAI_MODEL` is not set.
pub const DEFAULT_OPENAI_MODEL: &str = "text-embedding-3-small";

/// Output sizes of the hosted embedding models we know about.
const KNOWN_OPENAI_DIMENSIONS: &[(&str, usize)] = &[
    ("text-embedding-3-small", 1536),
    ("text-embedding-3-large", 3072),
    ("text-embedding-ada-002", 1536),
];

/// Provider configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the remote provider (`OPENAI_API_KEY`).
    pub openai_api_key: Option<String>,

    /// API base override (`OPENAI_BASE_URL`).
    pub openai_base_url: Option<String>,

    /// Remote embedding model. Default: `text-embedding-3-small`.
    pub openai_model: String,

    /// Requested output size for the remote model, sent with each request when set.
    pub openai_dimensions: Option<usize>,

    /// Cache directory for downloaded local models. Default: fastembed's own.
    pub model_cache: Option<PathBuf>,

    /// Show a progress bar while the local model downloads. Default: `true`.
    pub show_download_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_dimensions: None,
            model_cache: None,
            show_download_progress: true,
        }
    }
}

impl Config {
    pub const ENV_OPENAI_API_KEY: &'static str = "OPENAI_API_KEY";
    const ENV_OPENAI_BASE_URL: &'static str = "OPENAI_BASE_URL";
    const ENV_OPENAI_MODEL: &'static str = "JDRANK_OPENAI_MODEL";
    const ENV_OPENAI_DIMENSIONS: &'static str = "JDRANK_OPENAI_DIMENSIONS";
    const ENV_MODEL_CACHE: &'static str = "JDRANK_MODEL_CACHE";

    /// Loads configuration from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let openai_dimensions = match get(Self::ENV_OPENAI_DIMENSIONS) {
            Some(value) => Some(Self::parse_dimension(Self::ENV_OPENAI_DIMENSIONS, value)?),
            None => None,
        };

        Ok(Self {
            openai_api_key: get(Self::ENV_OPENAI_API_KEY),
            openai_base_url: get(Self::ENV_OPENAI_BASE_URL),
            openai_model: get(Self::ENV_OPENAI_MODEL).unwrap_or(defaults.openai_model),
            openai_dimensions,
            model_cache: get(Self::ENV_MODEL_CACHE).map(PathBuf::from),
            show_download_progress: defaults.show_download_progress,
        })
    }

    /// Expected vector size for the configured remote model.
    ///
    /// An explicit `JDRANK_OPENAI_DIMENSIONS` wins over the built-in table.
    pub fn openai_dimension(&self) -> Result<usize, ConfigError> {
        if let Some(dim) = self.openai_dimensions {
            return Ok(dim);
        }

        KNOWN_OPENAI_DIMENSIONS
            .iter()
            .find(|(model, _)| *model == self.openai_model)
            .map(|(_, dim)| *dim)
            .ok_or_else(|| ConfigError::UnknownModelDimension {
                model: self.openai_model.clone(),
                var: Self::ENV_OPENAI_DIMENSIONS,
            })
    }

    fn parse_dimension(name: &'static str, value: String) -> Result<usize, ConfigError> {
        let dim: usize = value.parse().map_err(|e| ConfigError::InvalidNumber {
            name,
            value: value.clone(),
            source: e,
        })?;

        if dim == 0 {
            return Err(ConfigError::OutOfRange { name, value });
        }

        Ok(dim)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.openai_api_key.is_none());
        assert!(config.openai_base_url.is_none());
        assert_eq!(config.openai_model, "text-embedding-3-small");
        assert!(config.openai_dimensions.is_none());
        assert!(config.model_cache.is_none());
        assert!(config.show_download_progress);
    }

    #[test]
    fn test_from_lookup_empty_env_uses_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();

        assert!(config.openai_api_key.is_none());
        assert_eq!(config.openai_model, DEFAULT_OPENAI_MODEL);
        assert_eq!(config.openai_dimension().unwrap(), 1536);
    }

    #[test]
    fn test_from_lookup_reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://localhost:8080/v1"),
            ("JDRANK_OPENAI_MODEL", "text-embedding-3-large"),
            ("JDRANK_MODEL_CACHE", "/tmp/models"),
        ]))
        .unwrap();

        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(
            config.openai_base_url.as_deref(),
            Some("http://localhost:8080/v1")
        );
        assert_eq!(config.openai_model, "text-embedding-3-large");
        assert_eq!(config.openai_dimension().unwrap(), 3072);
        assert_eq!(config.model_cache, Some(PathBuf::from("/tmp/models")));
    }

    #[test]
    fn test_blank_api_key_is_unset() {
        let config = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "   ")])).unwrap();
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn test_explicit_dimension_overrides_table() {
        let config = Config::from_lookup(lookup_from(&[
            ("JDRANK_OPENAI_MODEL", "text-embedding-3-large"),
            ("JDRANK_OPENAI_DIMENSIONS", "256"),
        ]))
        .unwrap();

        assert_eq!(config.openai_dimensions, Some(256));
        assert_eq!(config.openai_dimension().unwrap(), 256);
    }

    #[test]
    fn test_invalid_dimension() {
        let err = Config::from_lookup(lookup_from(&[("JDRANK_OPENAI_DIMENSIONS", "wide")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));

        let err =
            Config::from_lookup(lookup_from(&[("JDRANK_OPENAI_DIMENSIONS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
    }

    #[test]
    fn test_unknown_model_needs_dimension() {
        let config =
            Config::from_lookup(lookup_from(&[("JDRANK_OPENAI_MODEL", "my-embedder")])).unwrap();

        let err = config.openai_dimension().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownModelDimension { .. }));
        assert!(err.to_string().contains("JDRANK_OPENAI_DIMENSIONS"));
    }
}
