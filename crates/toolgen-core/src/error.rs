//! Error types for `toolgen-core`.

use thiserror::Error;

/// Main error type for descriptor generation.
///
/// Reference cycles are not represented here: the projector breaks them with
/// a placeholder node instead of failing (see [`crate::projector`]).
#[derive(Error, Debug)]
pub enum CoreError {
    /// The parsed document carries neither a Swagger 2.0 nor an OpenAPI 3.x marker.
    #[error("Unsupported document format: {0}")]
    DocumentFormat(String),

    /// The requested path is not declared in the document.
    #[error("Path '{0}' not found in document")]
    PathNotFound(String),

    /// The requested method is not declared for the path.
    #[error("Method '{method}' not found for path '{path}'")]
    MethodNotFound { path: String, method: String },

    /// A `$ref` points at a location that does not exist in the document.
    #[error("Unresolved $ref '{0}'")]
    ReferenceNotFound(String),
}

/// Result type alias for descriptor generation.
pub type Result<T> = std::result::Result<T, CoreError>;
