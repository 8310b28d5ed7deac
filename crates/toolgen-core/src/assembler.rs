//! Tool descriptor assembly.
//!
//! A descriptor names one operation, describes it for a tool-calling agent,
//! and carries an input schema whose properties come from the operation's
//! path parameters, query parameters, and exactly one request-body
//! projection. Header and formData parameters are not addressable through a
//! tool call and are silently excluded.

use crate::document::{Document, Operation, ParamLocation, Parameter, SchemaData, SchemaKind, SchemaNode};
use crate::error::Result;
use crate::lookup;
use crate::naming::{self, NameFlags};
use crate::projector;
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

/// Declarative descriptor for one callable operation.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: InputSchema,
}

/// The descriptor's input schema; always an object at the root.
#[derive(Debug, Clone, Serialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: &'static str,
    pub properties: IndexMap<String, SchemaNode>,
    pub required: Vec<String>,
}

/// Build the descriptor for one path+method combination.
///
/// # Errors
///
/// Fails fast with [`crate::error::CoreError::PathNotFound`],
/// [`crate::error::CoreError::MethodNotFound`], or
/// [`crate::error::CoreError::ReferenceNotFound`]; no partial descriptor is
/// returned.
pub fn build(
    document: &Document,
    path: &str,
    method: &str,
    flags: &NameFlags,
) -> Result<ToolDescriptor> {
    let operation = lookup::find(document, path, method)?;

    let mut properties: IndexMap<String, SchemaNode> = IndexMap::new();
    let mut required: Vec<String> = Vec::new();
    let mut has_body = false;

    for param in &operation.parameters {
        match param.location {
            ParamLocation::Header | ParamLocation::FormData => {}
            ParamLocation::Path => {
                let node = scalar_param_schema(
                    param,
                    document,
                    format!("Path parameter: {}", param.name),
                )?;
                properties.insert(param.name.clone(), node);
                if param.required {
                    required.push(param.name.clone());
                }
            }
            ParamLocation::Query => {
                let node = scalar_param_schema(
                    param,
                    document,
                    format!("Query parameter: {}", param.name),
                )?;
                properties.insert(param.name.clone(), node);
                if param.required {
                    required.push(param.name.clone());
                }
            }
            ParamLocation::Body => {
                // Swagger 2.0 body parameter; dots make poor property names.
                let key = param.name.replace('.', "");
                let mut node = match &param.schema {
                    Some(schema) => {
                        projector::project(schema, document, &mut HashSet::new())?
                    }
                    None => SchemaNode::object(IndexMap::new(), Vec::new()),
                };
                node.data.description = Some(
                    param
                        .description
                        .clone()
                        .unwrap_or_else(|| format!("Request body: {key}")),
                );
                properties.insert(key.clone(), node);
                if param.required {
                    required.push(key);
                }
                has_body = true;
            }
        }
    }

    // OpenAPI 3.x request body: exactly one body projection per descriptor,
    // keyed "requestBody" since the dialect provides no better name.
    if !has_body
        && let Some(body) = &operation.request_body
        && let Some(schema) = body.content.get("application/json")
    {
        let mut node = projector::project(schema, document, &mut HashSet::new())?;
        node.data.description = Some(
            body.description
                .clone()
                .unwrap_or_else(|| "Request body".to_string()),
        );
        properties.insert("requestBody".to_string(), node);
        if body.required {
            required.push("requestBody".to_string());
        }
    }

    Ok(ToolDescriptor {
        name: naming::tool_name(method, path, operation, flags),
        description: describe(operation, method, path),
        input_schema: InputSchema {
            schema_type: "object",
            properties,
            required,
        },
    })
}

/// Schema for a path/query parameter: the structured schema when the source
/// declares one, otherwise the bare type mapped into the target vocabulary
/// with any `enum` carried along.
fn scalar_param_schema(
    param: &Parameter,
    document: &Document,
    default_description: String,
) -> Result<SchemaNode> {
    let mut node = match &param.schema {
        Some(schema) => projector::project(schema, document, &mut HashSet::new())?,
        None => SchemaNode {
            data: SchemaData::default(),
            kind: SchemaKind::Primitive {
                type_name: Some(
                    projector::map_primitive_type(param.primitive_type.as_deref()).to_string(),
                ),
                format: None,
                enum_values: param.enum_values.clone(),
            },
        },
    };

    if node.data.description.is_none() {
        node.data.description = Some(param.description.clone().unwrap_or(default_description));
    }
    Ok(node)
}

/// Descriptor description: summary and description joined, or a synthesized
/// one-liner when the operation declares neither.
fn describe(operation: &Operation, method: &str, path: &str) -> String {
    let parts: Vec<&str> = [operation.summary.as_deref(), operation.description.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();
    if !parts.is_empty() {
        return parts.join(". ");
    }

    let extension = Regex::new(r"\.\w+$").unwrap();
    let resource = path
        .split('/')
        .filter(|s| !s.is_empty() && !s.starts_with('{'))
        .next_back()
        .map_or_else(|| path.to_string(), |s| extension.replace(s, "").into_owned());
    format!("{} {}", naming::verb_prefix(method), resource)
}
