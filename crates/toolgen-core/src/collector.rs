//! Transitive model discovery for a single operation.
//!
//! The walk visits, depth-first: the OpenAPI 3.x request body content
//! schemas, every parameter schema (or the item schema of an array-typed
//! Swagger 2.0 parameter), and every response schema across all status codes
//! and content types. Each `$ref` pointer is resolved at most once per call;
//! the visited set both deduplicates the output and bounds the walk on
//! densely cross-referenced or cyclic documents.

use crate::document::{Document, Operation, SchemaKind, SchemaNode};
use crate::error::Result;
use crate::projector;
use crate::resolver;
use serde::Serialize;
use std::collections::HashSet;

/// A named model referenced, directly or transitively, by an operation.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedModel {
    pub name: String,
    pub schema: SchemaNode,
}

/// Collect every model the operation references, in first-encounter order.
///
/// # Errors
///
/// Returns [`crate::error::CoreError::ReferenceNotFound`] for a dangling
/// `$ref` anywhere in the walk.
pub fn collect(operation: &Operation, document: &Document) -> Result<Vec<ResolvedModel>> {
    let mut models = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();

    if let Some(body) = &operation.request_body {
        for schema in body.content.values() {
            walk(schema, document, &mut models, &mut visited)?;
        }
    }

    for param in &operation.parameters {
        if let Some(schema) = &param.schema {
            walk(schema, document, &mut models, &mut visited)?;
        } else if param.primitive_type.as_deref() == Some("array")
            && let Some(items) = &param.items
        {
            walk(items, document, &mut models, &mut visited)?;
        }
    }

    for response in operation.responses.values() {
        if let Some(schema) = &response.schema {
            walk(schema, document, &mut models, &mut visited)?;
        }
        for schema in response.content.values().flatten() {
            walk(schema, document, &mut models, &mut visited)?;
        }
    }

    Ok(models)
}

fn walk(
    schema: &SchemaNode,
    document: &Document,
    models: &mut Vec<ResolvedModel>,
    visited: &mut HashSet<String>,
) -> Result<()> {
    match &schema.kind {
        SchemaKind::Ref { pointer } => {
            if !visited.insert(pointer.clone()) {
                return Ok(());
            }
            let target = resolver::resolve(pointer, document)?;

            // Project with the pointer already in flight so a self-cycle
            // collapses on its first re-occurrence.
            let mut visiting = HashSet::from([pointer.clone()]);
            let projected = projector::project(&target, document, &mut visiting)?;
            models.push(ResolvedModel {
                name: resolver::model_name(pointer).to_string(),
                schema: projected,
            });

            // Nested references are discovered before the outer walk resumes.
            walk(&target, document, models, visited)?;
        }
        SchemaKind::Array { items } => {
            walk(items, document, models, visited)?;
        }
        SchemaKind::Object { properties, .. } => {
            for prop in properties.values() {
                walk(prop, document, models, visited)?;
            }
        }
        SchemaKind::Composite { branches, .. } => {
            for branch in branches {
                walk(branch, document, models, visited)?;
            }
        }
        SchemaKind::Primitive { .. } => {}
    }
    Ok(())
}
