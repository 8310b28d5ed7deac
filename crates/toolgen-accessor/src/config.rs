use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides the configured document location.
/// Also honored from a `.env` file in the working directory.
pub const SOURCE_URL_ENV: &str = "SWAGGER_URL";

/// Configuration for a [`crate::loader::DocumentAccessor`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessorConfig {
    /// Document location: an http(s) URL or a file path.
    #[serde(default)]
    pub source: Option<String>,

    /// Directory for cached downloads, keyed by a SHA-256 hash of the
    /// source URL.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("swagger-cache")
}

impl Default for AccessorConfig {
    fn default() -> Self {
        AccessorConfig {
            source: None,
            cache_dir: default_cache_dir(),
        }
    }
}

impl AccessorConfig {
    /// Config pointing at a fixed source with the default cache directory.
    #[must_use]
    pub fn for_source(source: impl Into<String>) -> Self {
        AccessorConfig {
            source: Some(source.into()),
            ..AccessorConfig::default()
        }
    }
}
