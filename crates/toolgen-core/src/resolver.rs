//! Local `$ref` pointer resolution.
//!
//! Model references (`#/definitions/...`, `#/components/schemas/...`) take a
//! fast path through the adapted model map; anything else walks the raw
//! document value segment by segment. No caching happens here: callers that
//! need dedup keep their own visited set.

use crate::document::{Document, SchemaNode};
use crate::error::{CoreError, Result};
use serde_json::Value;

/// The final segment of a pointer, used as the model name.
#[must_use]
pub fn model_name(pointer: &str) -> &str {
    pointer.rsplit('/').next().unwrap_or(pointer)
}

/// Resolve a pointer to the schema it designates.
///
/// # Errors
///
/// Returns [`CoreError::ReferenceNotFound`] if any pointer segment is absent
/// from the document.
pub fn resolve(pointer: &str, document: &Document) -> Result<SchemaNode> {
    let trimmed = pointer.strip_prefix('#').unwrap_or(pointer);
    let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        ["definitions", name] | ["components", "schemas", name] => {
            return document
                .models
                .get(*name)
                .cloned()
                .ok_or_else(|| CoreError::ReferenceNotFound(pointer.to_string()));
        }
        _ => {}
    }

    let mut current = document.raw();
    for segment in &segments {
        let next = match current {
            Value::Object(map) => map.get(*segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        current = next.ok_or_else(|| CoreError::ReferenceNotFound(pointer.to_string()))?;
    }

    Ok(SchemaNode::from_value(current))
}
