//! Tagged document model shared by both supported dialects.
//!
//! Swagger 2.0 and OpenAPI 3.x disagree on where models live (`definitions`
//! vs `components.schemas`), how request bodies are declared, and how
//! response payloads are keyed. The adapter in this module folds both shapes
//! into one tagged representation at construction time, so the resolution
//! and naming logic downstream never probes for dialect-specific properties.

use crate::error::{CoreError, Result};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Source dialect of a parsed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Swagger 2.0 (`swagger: "2.x"`).
    V2,
    /// OpenAPI 3.x (`openapi: "3.x"`).
    V3,
}

/// HTTP methods recognized inside a path item. Everything else under a path
/// (e.g. `parameters`, vendor extensions) is not an operation.
pub const KNOWN_METHODS: [&str; 7] = ["get", "post", "put", "delete", "patch", "options", "head"];

/// A parsed, dialect-tagged API description.
///
/// `paths` and `models` keep document order. The raw parsed value is retained
/// so `$ref` pointers into arbitrary locations can still be walked.
#[derive(Debug, Clone)]
pub struct Document {
    pub dialect: Dialect,
    pub paths: IndexMap<String, PathItem>,
    pub models: IndexMap<String, SchemaNode>,
    raw: Value,
}

/// Operations declared for one path, keyed by lowercase HTTP method.
#[derive(Debug, Clone, Default)]
pub struct PathItem {
    pub operations: IndexMap<String, Operation>,
}

/// One path+method combination.
#[derive(Debug, Clone, Default)]
pub struct Operation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub parameters: Vec<Parameter>,
    /// OpenAPI 3.x request body; Swagger 2.0 uses a `body` parameter instead.
    pub request_body: Option<RequestBody>,
    pub responses: IndexMap<String, ResponseSpec>,
    /// Swagger 2.0 `produces` content types.
    pub produces: Vec<String>,
}

/// OpenAPI 3.x request body: content type to schema, in declared order.
/// Content entries without a schema are dropped.
#[derive(Debug, Clone, Default)]
pub struct RequestBody {
    pub description: Option<String>,
    pub required: bool,
    pub content: IndexMap<String, SchemaNode>,
}

/// One response entry. Swagger 2.0 declares a single `schema`; OpenAPI 3.x
/// declares `content` keyed by content type (a content entry may carry no
/// schema at all, but its key still matters for format-suffix naming).
#[derive(Debug, Clone, Default)]
pub struct ResponseSpec {
    pub description: Option<String>,
    pub schema: Option<SchemaNode>,
    pub content: IndexMap<String, Option<SchemaNode>>,
}

/// Where a parameter is transported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    FormData,
    Body,
}

/// One operation parameter, covering both dialect shapes.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub location: ParamLocation,
    pub required: bool,
    pub description: Option<String>,
    /// Structured schema: OpenAPI 3.x `schema`, or the Swagger 2.0 `body`
    /// parameter schema.
    pub schema: Option<SchemaNode>,
    /// Swagger 2.0 non-body parameters carry a bare type instead of a schema.
    pub primitive_type: Option<String>,
    pub enum_values: Option<Vec<Value>>,
    /// Swagger 2.0 `items` for array-typed non-body parameters.
    pub items: Option<SchemaNode>,
}

/// Attributes every schema variant may carry. `title` doubles as the
/// model-name metadata attached during projection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaData {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A schema tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub data: SchemaData,
    pub kind: SchemaKind,
}

/// The structural variant of a schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// An unresolved `$ref` pointer.
    Ref { pointer: String },
    /// An object with ordered properties.
    Object {
        properties: IndexMap<String, SchemaNode>,
        required: Vec<String>,
    },
    /// An array of homogeneous items.
    Array { items: Box<SchemaNode> },
    /// `allOf` / `anyOf` / `oneOf` with independent branches.
    Composite {
        kind: CompositeKind,
        branches: Vec<SchemaNode>,
    },
    /// A scalar (or an array/object declared without structure). The type
    /// name stays in the source vocabulary until projection maps it.
    Primitive {
        type_name: Option<String>,
        format: Option<String>,
        enum_values: Option<Vec<Value>>,
    },
}

/// Composition keyword of a [`SchemaKind::Composite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeKind {
    AllOf,
    AnyOf,
    OneOf,
}

impl CompositeKind {
    /// The JSON Schema keyword for this composition.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            CompositeKind::AllOf => "allOf",
            CompositeKind::AnyOf => "anyOf",
            CompositeKind::OneOf => "oneOf",
        }
    }
}

impl SchemaNode {
    /// An object node with the given properties and required names.
    #[must_use]
    pub fn object(properties: IndexMap<String, SchemaNode>, required: Vec<String>) -> Self {
        SchemaNode {
            data: SchemaData::default(),
            kind: SchemaKind::Object {
                properties,
                required,
            },
        }
    }

    /// A bare primitive node of the given source type.
    #[must_use]
    pub fn primitive(type_name: &str) -> Self {
        SchemaNode {
            data: SchemaData::default(),
            kind: SchemaKind::Primitive {
                type_name: Some(type_name.to_string()),
                format: None,
                enum_values: None,
            },
        }
    }

    /// Adapt a raw schema value into a tagged node. `$ref`s stay unresolved.
    ///
    /// Absent or unrecognizable input degrades to an untyped primitive, the
    /// same lenient reading both dialects get in practice; type defaulting
    /// happens later, during projection.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let data = SchemaData {
            title: string_field(value, "title"),
            description: string_field(value, "description"),
        };

        if let Some(pointer) = value.get("$ref").and_then(Value::as_str) {
            return SchemaNode {
                data,
                kind: SchemaKind::Ref {
                    pointer: pointer.to_string(),
                },
            };
        }

        for (keyword, kind) in [
            ("allOf", CompositeKind::AllOf),
            ("anyOf", CompositeKind::AnyOf),
            ("oneOf", CompositeKind::OneOf),
        ] {
            if let Some(branches) = value.get(keyword).and_then(Value::as_array) {
                return SchemaNode {
                    data,
                    kind: SchemaKind::Composite {
                        kind,
                        branches: branches.iter().map(SchemaNode::from_value).collect(),
                    },
                };
            }
        }

        let type_name = string_field(value, "type");

        if type_name.as_deref() == Some("array")
            && let Some(items) = value.get("items")
        {
            return SchemaNode {
                data,
                kind: SchemaKind::Array {
                    items: Box::new(SchemaNode::from_value(items)),
                },
            };
        }

        if type_name.as_deref() == Some("object") || value.get("properties").is_some() {
            let properties = value
                .get("properties")
                .and_then(Value::as_object)
                .map(|props| {
                    props
                        .iter()
                        .map(|(name, prop)| (name.clone(), SchemaNode::from_value(prop)))
                        .collect()
                })
                .unwrap_or_default();
            let required = value
                .get("required")
                .and_then(Value::as_array)
                .map(|names| {
                    names
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            return SchemaNode {
                data,
                kind: SchemaKind::Object {
                    properties,
                    required,
                },
            };
        }

        SchemaNode {
            data,
            kind: SchemaKind::Primitive {
                type_name,
                format: string_field(value, "format"),
                enum_values: value.get("enum").and_then(Value::as_array).cloned(),
            },
        }
    }
}

// Serialized as JSON Schema. A manual impl keeps property order intact and
// omits empty collections.
impl Serialize for SchemaNode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        match &self.kind {
            SchemaKind::Ref { pointer } => {
                map.serialize_entry("$ref", pointer)?;
            }
            SchemaKind::Object {
                properties,
                required,
            } => {
                map.serialize_entry("type", "object")?;
                self.serialize_data(&mut map)?;
                if !properties.is_empty() {
                    map.serialize_entry("properties", properties)?;
                }
                if !required.is_empty() {
                    map.serialize_entry("required", required)?;
                }
            }
            SchemaKind::Array { items } => {
                map.serialize_entry("type", "array")?;
                self.serialize_data(&mut map)?;
                map.serialize_entry("items", items.as_ref())?;
            }
            SchemaKind::Composite { kind, branches } => {
                self.serialize_data(&mut map)?;
                map.serialize_entry(kind.keyword(), branches)?;
            }
            SchemaKind::Primitive {
                type_name,
                format,
                enum_values,
            } => {
                if let Some(type_name) = type_name {
                    map.serialize_entry("type", type_name)?;
                }
                self.serialize_data(&mut map)?;
                if let Some(format) = format {
                    map.serialize_entry("format", format)?;
                }
                if let Some(enum_values) = enum_values {
                    map.serialize_entry("enum", enum_values)?;
                }
            }
        }
        map.end()
    }
}

impl SchemaNode {
    fn serialize_data<M>(&self, map: &mut M) -> std::result::Result<(), M::Error>
    where
        M: SerializeMap,
    {
        if let Some(title) = &self.data.title {
            map.serialize_entry("title", title)?;
        }
        if let Some(description) = &self.data.description {
            map.serialize_entry("description", description)?;
        }
        Ok(())
    }
}

impl Document {
    /// Build the tagged document from a parsed value.
    ///
    /// This is the single version-aware boundary: the dialect is detected
    /// from the `swagger` / `openapi` markers and both shapes fold into one
    /// representation here.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DocumentFormat`] if neither dialect marker is
    /// present.
    pub fn from_value(value: &Value) -> Result<Document> {
        let dialect = detect_dialect(value)?;

        let models_value = match dialect {
            Dialect::V2 => value.get("definitions"),
            Dialect::V3 => value.get("components").and_then(|c| c.get("schemas")),
        };
        let models = models_value
            .and_then(Value::as_object)
            .map(|schemas| {
                schemas
                    .iter()
                    .map(|(name, schema)| (name.clone(), SchemaNode::from_value(schema)))
                    .collect()
            })
            .unwrap_or_default();

        let mut paths: IndexMap<String, PathItem> = IndexMap::new();
        if let Some(path_map) = value.get("paths").and_then(Value::as_object) {
            for (path, item_value) in path_map {
                let mut item = PathItem::default();
                if let Some(item_map) = item_value.as_object() {
                    for (method, op_value) in item_map {
                        if KNOWN_METHODS.contains(&method.as_str()) {
                            item.operations
                                .insert(method.clone(), operation_from_value(dialect, op_value));
                        }
                    }
                }
                paths.insert(path.clone(), item);
            }
        }

        Ok(Document {
            dialect,
            paths,
            models,
            raw: value.clone(),
        })
    }

    /// The raw parsed value the document was built from.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

fn detect_dialect(value: &Value) -> Result<Dialect> {
    if let Some(version) = value.get("openapi").and_then(Value::as_str)
        && version.starts_with("3.")
    {
        return Ok(Dialect::V3);
    }
    if let Some(version) = value.get("swagger").and_then(Value::as_str)
        && version.starts_with("2.")
    {
        return Ok(Dialect::V2);
    }
    Err(CoreError::DocumentFormat(
        "missing 'swagger: 2.x' or 'openapi: 3.x' version marker".to_string(),
    ))
}

fn operation_from_value(dialect: Dialect, value: &Value) -> Operation {
    let parameters = value
        .get("parameters")
        .and_then(Value::as_array)
        .map(|params| params.iter().map(parameter_from_value).collect())
        .unwrap_or_default();

    let request_body = match dialect {
        Dialect::V3 => value.get("requestBody").map(request_body_from_value),
        Dialect::V2 => None,
    };

    let responses = value
        .get("responses")
        .and_then(Value::as_object)
        .map(|responses| {
            responses
                .iter()
                .map(|(code, resp)| (code.clone(), response_from_value(resp)))
                .collect()
        })
        .unwrap_or_default();

    Operation {
        operation_id: string_field(value, "operationId"),
        summary: string_field(value, "summary"),
        description: string_field(value, "description"),
        tags: value
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        parameters,
        request_body,
        responses,
        produces: value
            .get("produces")
            .and_then(Value::as_array)
            .map(|types| {
                types
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn request_body_from_value(value: &Value) -> RequestBody {
    let content = value
        .get("content")
        .and_then(Value::as_object)
        .map(|content| {
            content
                .iter()
                .filter_map(|(content_type, media)| {
                    media
                        .get("schema")
                        .map(|schema| (content_type.clone(), SchemaNode::from_value(schema)))
                })
                .collect()
        })
        .unwrap_or_default();

    RequestBody {
        description: string_field(value, "description"),
        required: bool_field(value, "required"),
        content,
    }
}

fn response_from_value(value: &Value) -> ResponseSpec {
    let content = value
        .get("content")
        .and_then(Value::as_object)
        .map(|content| {
            content
                .iter()
                .map(|(content_type, media)| {
                    (
                        content_type.clone(),
                        media.get("schema").map(SchemaNode::from_value),
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    ResponseSpec {
        description: string_field(value, "description"),
        schema: value.get("schema").map(SchemaNode::from_value),
        content,
    }
}

fn parameter_from_value(value: &Value) -> Parameter {
    Parameter {
        name: string_field(value, "name").unwrap_or_default(),
        location: parse_location(value.get("in").and_then(Value::as_str).unwrap_or_default()),
        required: bool_field(value, "required"),
        description: string_field(value, "description"),
        schema: value.get("schema").map(SchemaNode::from_value),
        primitive_type: string_field(value, "type"),
        enum_values: value.get("enum").and_then(Value::as_array).cloned(),
        items: value.get("items").map(SchemaNode::from_value),
    }
}

// Cookie parameters (and any future locations) are treated like headers:
// carried through the model but excluded from tool schemas.
fn parse_location(location: &str) -> ParamLocation {
    match location {
        "path" => ParamLocation::Path,
        "query" => ParamLocation::Query,
        "formData" => ParamLocation::FormData,
        "body" => ParamLocation::Body,
        _ => ParamLocation::Header,
    }
}

fn string_field(value: &Value, field: &str) -> Option<String> {
    value.get(field).and_then(Value::as_str).map(str::to_string)
}

fn bool_field(value: &Value, field: &str) -> bool {
    value.get(field).and_then(Value::as_bool).unwrap_or(false)
}
