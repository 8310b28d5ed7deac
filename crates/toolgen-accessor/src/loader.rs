//! Document loading: URL fetch, content-addressed cache, file paths.
//!
//! Cache layout follows the download source: a fetched document is stored
//! under `<sha256(url)>.json` or `.yaml` in the cache directory and reused
//! on subsequent loads. Only payloads carrying a recognizable dialect marker
//! are cached, so an error page never poisons the cache.

use crate::config::{AccessorConfig, SOURCE_URL_ENV};
use crate::error::{AccessorError, Result};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use toolgen_core::document::Document;
use url::Url;

/// Loads documents from a configured location, caching URL downloads on disk.
#[derive(Debug, Clone)]
pub struct DocumentAccessor {
    config: AccessorConfig,
    client: reqwest::Client,
}

impl DocumentAccessor {
    /// Create an accessor. A `.env` file in the working directory is loaded
    /// so the `SWAGGER_URL` override works without exporting it.
    #[must_use]
    pub fn new(config: AccessorConfig) -> Self {
        dotenvy::dotenv().ok();
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Load, decode, and dialect-tag the configured document.
    ///
    /// # Errors
    ///
    /// Returns an error if no source is configured, the fetch or file read
    /// fails, the payload is neither JSON nor YAML, or the payload carries
    /// no dialect marker.
    pub async fn load(&self) -> Result<Document> {
        let source = self.effective_source()?;
        if source.starts_with("http://") || source.starts_with("https://") {
            self.load_from_url(&source).await
        } else {
            tracing::info!("Reading document from {source}");
            let value = read_document_file(Path::new(&source))?;
            Ok(Document::from_value(&value)?)
        }
    }

    // The environment override wins over the configured location.
    fn effective_source(&self) -> Result<String> {
        if let Ok(url) = std::env::var(SOURCE_URL_ENV) {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }
        self.config
            .source
            .clone()
            .ok_or(AccessorError::MissingSource)
    }

    fn cache_paths(&self, url: &Url) -> (PathBuf, PathBuf) {
        let digest = hex::encode(Sha256::digest(url.as_str().as_bytes()));
        (
            self.config.cache_dir.join(format!("{digest}.json")),
            self.config.cache_dir.join(format!("{digest}.yaml")),
        )
    }

    async fn load_from_url(&self, source: &str) -> Result<Document> {
        let url = Url::parse(source).map_err(|e| AccessorError::InvalidUrl {
            url: source.to_string(),
            message: e.to_string(),
        })?;

        let (json_path, yaml_path) = self.cache_paths(&url);
        for cached in [&json_path, &yaml_path] {
            if cached.exists() {
                tracing::info!("Using cached document from {}", cached.display());
                let value = read_document_file(cached)?;
                return Ok(Document::from_value(&value)?);
            }
        }

        tracing::info!("Downloading document from {url}");
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "application/json, application/yaml, text/yaml",
            )
            .send()
            .await
            .map_err(|e| AccessorError::Fetch {
                url: source.to_string(),
                message: e.to_string(),
            })?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response.text().await.map_err(|e| AccessorError::Fetch {
            url: source.to_string(),
            message: e.to_string(),
        })?;

        let value = parse_document_text(source, &text)?;
        let document = Document::from_value(&value)?;

        let is_yaml = source.ends_with(".yaml")
            || source.ends_with(".yml")
            || content_type.as_deref().is_some_and(|ct| ct.contains("yaml"))
            || !matches!(text.trim_start().chars().next(), Some('{') | Some('['));
        let cache_path = if is_yaml { yaml_path } else { json_path };

        std::fs::create_dir_all(&self.config.cache_dir)?;
        std::fs::write(&cache_path, &text)?;
        tracing::info!("Document cached at {}", cache_path.display());

        Ok(document)
    }
}

/// Read and decode a document file (JSON or YAML).
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub fn read_document_file(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path).map_err(|e| AccessorError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_document_text(&path.display().to_string(), &text)
}

// JSON parses first for its better error messages; YAML catches the rest
// (JSON is a valid YAML subset, so one YAML pass would also do).
fn parse_document_text(location: &str, text: &str) -> Result<Value> {
    serde_json::from_str(text)
        .or_else(|_| serde_yaml::from_str(text))
        .map_err(|e| AccessorError::Parse {
            location: location.to_string(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use toolgen_core::document::Dialect;

    #[test]
    fn missing_source_is_an_error() {
        let accessor = DocumentAccessor::new(AccessorConfig::default());
        let err = accessor.effective_source().unwrap_err();
        assert!(matches!(err, AccessorError::MissingSource));
    }

    #[tokio::test]
    async fn loads_a_json_document_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"swagger": "2.0", "paths": {{"/pets": {{"get": {{}}}}}}}}"#
        )
        .unwrap();

        let accessor =
            DocumentAccessor::new(AccessorConfig::for_source(file.path().display().to_string()));
        let document = accessor.load().await.unwrap();
        assert_eq!(document.dialect, Dialect::V2);
        assert!(document.paths.contains_key("/pets"));
    }

    #[tokio::test]
    async fn loads_a_yaml_document_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "openapi: \"3.0.0\"\npaths:\n  /tasks:\n    get: {{}}\n"
        )
        .unwrap();

        let accessor =
            DocumentAccessor::new(AccessorConfig::for_source(file.path().display().to_string()));
        let document = accessor.load().await.unwrap();
        assert_eq!(document.dialect, Dialect::V3);
    }

    #[tokio::test]
    async fn untagged_documents_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"title": "not an api description"}}"#).unwrap();

        let accessor =
            DocumentAccessor::new(AccessorConfig::for_source(file.path().display().to_string()));
        let err = accessor.load().await.unwrap_err();
        assert!(matches!(
            err,
            AccessorError::Document(toolgen_core::error::CoreError::DocumentFormat(_))
        ));
    }

    #[tokio::test]
    async fn unparsable_payloads_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ this is : neither : json nor yaml").unwrap();

        let accessor =
            DocumentAccessor::new(AccessorConfig::for_source(file.path().display().to_string()));
        let err = accessor.load().await.unwrap_err();
        assert!(matches!(err, AccessorError::Parse { .. }));
    }
}
