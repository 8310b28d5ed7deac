//! Cycle-safe schema projection.
//!
//! Projection turns a raw schema node into a self-contained tree with every
//! `$ref` inlined. Cycle handling uses an explicit in-flight pointer set
//! rather than relying on call-stack depth: the second occurrence of a
//! pointer collapses to an empty object placeholder titled with the model
//! name, so cyclic model graphs terminate without an error.

use crate::document::{Document, SchemaData, SchemaKind, SchemaNode};
use crate::error::Result;
use crate::resolver;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Map the source type vocabulary to the tool-schema vocabulary.
///
/// `file` is transported as a base64 string; anything unknown or absent
/// defaults to `string`.
#[must_use]
pub fn map_primitive_type(source: Option<&str>) -> &'static str {
    match source {
        Some("integer") => "integer",
        Some("number") => "number",
        Some("boolean") => "boolean",
        Some("array") => "array",
        Some("object") => "object",
        // `string` and `file` both land here, as does anything unrecognized.
        _ => "string",
    }
}

/// Project a schema node into a fully inlined tree.
///
/// `visiting` is the in-flight pointer set; top-level callers pass an empty
/// one. Composite branches are projected independently and never merged --
/// whether `allOf` branches should flatten into one object is a caller
/// decision.
///
/// # Errors
///
/// Returns [`crate::error::CoreError::ReferenceNotFound`] for a dangling
/// `$ref`. A cyclic reference is not an error.
pub fn project(
    node: &SchemaNode,
    document: &Document,
    visiting: &mut HashSet<String>,
) -> Result<SchemaNode> {
    match &node.kind {
        SchemaKind::Ref { pointer } => {
            let name = resolver::model_name(pointer).to_string();
            if visiting.contains(pointer) {
                return Ok(placeholder(name));
            }
            let target = resolver::resolve(pointer, document)?;
            visiting.insert(pointer.clone());
            let mut projected = project(&target, document, visiting)?;
            visiting.remove(pointer);
            projected.data.title = Some(name);
            Ok(projected)
        }
        SchemaKind::Array { items } => Ok(SchemaNode {
            data: node.data.clone(),
            kind: SchemaKind::Array {
                items: Box::new(project(items, document, visiting)?),
            },
        }),
        SchemaKind::Object {
            properties,
            required,
        } => {
            let mut projected = IndexMap::with_capacity(properties.len());
            for (name, prop) in properties {
                projected.insert(name.clone(), project(prop, document, visiting)?);
            }
            Ok(SchemaNode {
                data: node.data.clone(),
                kind: SchemaKind::Object {
                    properties: projected,
                    required: required.clone(),
                },
            })
        }
        SchemaKind::Composite { kind, branches } => {
            let mut projected = Vec::with_capacity(branches.len());
            for branch in branches {
                projected.push(project(branch, document, visiting)?);
            }
            Ok(SchemaNode {
                data: node.data.clone(),
                kind: SchemaKind::Composite {
                    kind: *kind,
                    branches: projected,
                },
            })
        }
        SchemaKind::Primitive {
            type_name,
            format,
            enum_values,
        } => Ok(SchemaNode {
            data: node.data.clone(),
            kind: SchemaKind::Primitive {
                type_name: Some(map_primitive_type(type_name.as_deref()).to_string()),
                format: format.clone(),
                enum_values: enum_values.clone(),
            },
        }),
    }
}

/// The terminal node substituted for an in-flight reference.
fn placeholder(name: String) -> SchemaNode {
    SchemaNode {
        data: SchemaData {
            title: Some(name),
            description: None,
        },
        kind: SchemaKind::Object {
            properties: IndexMap::new(),
            required: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn project_root(node: &SchemaNode, document: &Document) -> Result<SchemaNode> {
        let mut visiting = HashSet::new();
        project(node, document, &mut visiting)
    }

    #[test]
    fn ref_free_tree_projects_to_an_identical_structure() {
        let document = Document::from_value(&json!({"swagger": "2.0", "paths": {}})).unwrap();
        let node = SchemaNode::from_value(&json!({
            "type": "object",
            "description": "outer",
            "required": ["kind"],
            "properties": {
                "kind": {"type": "string", "enum": ["a", "b"], "description": "which"},
                "count": {"type": "integer", "format": "int32"},
                "children": {"type": "array", "items": {"type": "string"}}
            }
        }));

        let projected = project_root(&node, &document).unwrap();
        assert_eq!(projected, node);
    }

    #[test]
    fn refs_inline_the_target_and_carry_the_model_name() {
        let document = Document::from_value(&json!({
            "swagger": "2.0",
            "paths": {},
            "definitions": {
                "Pet": {
                    "type": "object",
                    "description": "A pet",
                    "properties": {"name": {"type": "string"}}
                }
            }
        }))
        .unwrap();

        let node = SchemaNode::from_value(&json!({"$ref": "#/definitions/Pet"}));
        let projected = project_root(&node, &document).unwrap();

        assert_eq!(projected.data.title.as_deref(), Some("Pet"));
        assert_eq!(projected.data.description.as_deref(), Some("A pet"));
        let SchemaKind::Object { properties, .. } = &projected.kind else {
            panic!("expected object");
        };
        assert!(properties.contains_key("name"));
    }

    #[test]
    fn mutual_recursion_terminates_with_a_placeholder() {
        let document = Document::from_value(&json!({
            "swagger": "2.0",
            "paths": {},
            "definitions": {
                "A": {
                    "type": "object",
                    "properties": {"b": {"$ref": "#/definitions/B"}}
                },
                "B": {
                    "type": "object",
                    "properties": {"a": {"$ref": "#/definitions/A"}}
                }
            }
        }))
        .unwrap();

        let node = SchemaNode::from_value(&json!({"$ref": "#/definitions/A"}));
        let projected = project_root(&node, &document).unwrap();

        let SchemaKind::Object { properties, .. } = &projected.kind else {
            panic!("expected object");
        };
        let SchemaKind::Object {
            properties: b_props,
            ..
        } = &properties["b"].kind
        else {
            panic!("expected object for B");
        };
        // The second occurrence of A is a bare placeholder.
        let a_again = &b_props["a"];
        assert_eq!(a_again.data.title.as_deref(), Some("A"));
        let SchemaKind::Object {
            properties: empty, ..
        } = &a_again.kind
        else {
            panic!("expected placeholder object");
        };
        assert!(empty.is_empty());
    }

    #[test]
    fn self_reference_terminates() {
        let document = Document::from_value(&json!({
            "swagger": "2.0",
            "paths": {},
            "definitions": {
                "Node": {
                    "type": "object",
                    "properties": {
                        "next": {"$ref": "#/definitions/Node"},
                        "value": {"type": "string"}
                    }
                }
            }
        }))
        .unwrap();

        let node = SchemaNode::from_value(&json!({"$ref": "#/definitions/Node"}));
        let projected = project_root(&node, &document).unwrap();
        let SchemaKind::Object { properties, .. } = &projected.kind else {
            panic!("expected object");
        };
        let SchemaKind::Object {
            properties: inner, ..
        } = &properties["next"].kind
        else {
            panic!("expected placeholder");
        };
        assert!(inner.is_empty());
    }

    #[test]
    fn primitive_types_map_to_the_target_vocabulary() {
        assert_eq!(map_primitive_type(Some("integer")), "integer");
        assert_eq!(map_primitive_type(Some("file")), "string");
        assert_eq!(map_primitive_type(Some("weird")), "string");
        assert_eq!(map_primitive_type(None), "string");
    }

    #[test]
    fn dangling_ref_fails_fast() {
        let document = Document::from_value(&json!({"swagger": "2.0", "paths": {}})).unwrap();
        let node = SchemaNode::from_value(&json!({"$ref": "#/definitions/Ghost"}));
        let err = project_root(&node, &document).unwrap_err();
        assert!(matches!(err, CoreError::ReferenceNotFound(_)));
    }

    #[test]
    fn all_of_branches_stay_separate() {
        let document = Document::from_value(&json!({
            "swagger": "2.0",
            "paths": {},
            "definitions": {
                "Base": {"type": "object", "properties": {"id": {"type": "integer"}}}
            }
        }))
        .unwrap();

        let node = SchemaNode::from_value(&json!({
            "allOf": [
                {"$ref": "#/definitions/Base"},
                {"type": "object", "properties": {"name": {"type": "string"}}}
            ]
        }));
        let projected = project_root(&node, &document).unwrap();
        let SchemaKind::Composite { branches, .. } = &projected.kind else {
            panic!("expected composite");
        };
        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0].data.title.as_deref(), Some("Base"));
    }
}
