//! Operation lookup across both dialects.

use crate::document::{Document, KNOWN_METHODS, Operation};
use crate::error::{CoreError, Result};

/// Locate the operation for a path+method combination.
///
/// The path must match a declared path string exactly; templated parameters
/// are not normalized, so `/pets/{id}` and `/pets/{petId}` are distinct keys.
/// The method is matched case-insensitively against the known HTTP verbs.
///
/// # Errors
///
/// Returns [`CoreError::PathNotFound`] or [`CoreError::MethodNotFound`]
/// respectively; an unrecognized verb is a `MethodNotFound`.
pub fn find<'a>(document: &'a Document, path: &str, method: &str) -> Result<&'a Operation> {
    let item = document
        .paths
        .get(path)
        .ok_or_else(|| CoreError::PathNotFound(path.to_string()))?;

    let method_lower = method.to_ascii_lowercase();
    if !KNOWN_METHODS.contains(&method_lower.as_str()) {
        return Err(CoreError::MethodNotFound {
            path: path.to_string(),
            method: method.to_string(),
        });
    }

    item.operations
        .get(&method_lower)
        .ok_or_else(|| CoreError::MethodNotFound {
            path: path.to_string(),
            method: method.to_string(),
        })
}
