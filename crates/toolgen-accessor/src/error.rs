//! Error types for `toolgen-accessor`.

use thiserror::Error;
use toolgen_core::error::CoreError;

/// Main error type for document retrieval and decoding.
#[derive(Error, Debug)]
pub enum AccessorError {
    /// No document location configured and no environment override set.
    #[error("Document location is required: set `source` or the SWAGGER_URL environment variable")]
    MissingSource,

    /// The source URL does not parse.
    #[error("Invalid document URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The download failed (transport error or unreadable body).
    #[error("Failed to fetch document from '{url}': {message}")]
    Fetch { url: String, message: String },

    /// The document file could not be read.
    #[error("Failed to read document file '{path}': {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The payload is neither valid JSON nor valid YAML.
    #[error("Failed to parse document from '{location}': {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Cache-directory IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload parsed but is not a recognizable API description.
    #[error(transparent)]
    Document(#[from] CoreError),
}

/// Result type alias for document retrieval.
pub type Result<T> = std::result::Result<T, AccessorError>;
