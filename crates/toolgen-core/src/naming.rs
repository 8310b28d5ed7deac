//! Deterministic tool-name synthesis.
//!
//! A name is `verb prefix + base name + format suffix`:
//! - the verb prefix maps the HTTP method to an action word (`GET` -> `Get`,
//!   `POST` -> `Create`, ...);
//! - the base name comes from the `operationId` when one exists, otherwise
//!   from the path, with `api`/version segments filtered and resource
//!   segments optionally singularized;
//! - the format suffix (`AsPdf`, `AsCsv`, ...) is inferred from the path
//!   extension, the Swagger 2.0 `produces` list, or the OpenAPI 3.x response
//!   content types, in that priority order.
//!
//! Synthesis is a pure function of its inputs. No uniqueness is enforced
//! across operations: two operations can legitimately synthesize the same
//! name, and disambiguation is left to the caller.

use crate::document::Operation;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Heuristics applied while deriving a tool name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NameFlags {
    /// Keep `api` path/operationId segments in the name.
    pub include_api_in_name: bool,
    /// Keep version segments (`v1`, `v2.1`, ...) in the name.
    pub include_version_in_name: bool,
    /// Singularize resource segments (`companies` -> `Company`).
    pub singularize_resource_names: bool,
}

impl Default for NameFlags {
    fn default() -> Self {
        NameFlags {
            include_api_in_name: false,
            include_version_in_name: false,
            singularize_resource_names: true,
        }
    }
}

const EXTENSION_SUFFIXES: [(&str, &str); 7] = [
    (".pdf", "AsPdf"),
    (".csv", "AsCsv"),
    (".xlsx", "AsExcel"),
    (".xls", "AsExcel"),
    (".html", "AsHtml"),
    (".xml", "AsXml"),
    (".txt", "AsText"),
];

fn suffix_for_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "application/pdf" => Some("AsPdf"),
        "text/csv" => Some("AsCsv"),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        | "application/vnd.ms-excel" => Some("AsExcel"),
        "text/html" => Some("AsHtml"),
        "application/xml" | "text/xml" => Some("AsXml"),
        "text/plain" => Some("AsText"),
        _ => None,
    }
}

/// Infer the format suffix for an operation. The path extension wins over
/// the declared content types; no match means an implicit-JSON empty suffix.
fn format_suffix(path: &str, operation: &Operation) -> &'static str {
    for (extension, suffix) in EXTENSION_SUFFIXES {
        if path.ends_with(extension) {
            return suffix;
        }
    }

    if let Some(first) = operation.produces.first()
        && let Some(suffix) = suffix_for_content_type(first)
    {
        return suffix;
    }

    // OpenAPI 3.x: scan responses by ascending status code, first matching
    // content-type key wins.
    let mut codes: Vec<&String> = operation.responses.keys().collect();
    codes.sort();
    for code in codes {
        for content_type in operation.responses[code.as_str()].content.keys() {
            if let Some(suffix) = suffix_for_content_type(content_type) {
                return suffix;
            }
        }
    }

    ""
}

/// Action word for an HTTP method. Methods outside the CRUD mapping are
/// capitalized as-is.
pub(crate) fn verb_prefix(method: &str) -> String {
    match method.to_ascii_uppercase().as_str() {
        "GET" => "Get".to_string(),
        "POST" => "Create".to_string(),
        "PUT" | "PATCH" => "Update".to_string(),
        "DELETE" => "Delete".to_string(),
        other => capitalize(&other.to_ascii_lowercase()),
    }
}

/// Derive the tool name for an operation.
#[must_use]
pub fn tool_name(method: &str, path: &str, operation: &Operation, flags: &NameFlags) -> String {
    let suffix = format_suffix(path, operation);
    let base = match operation.operation_id.as_deref() {
        Some(id) if !id.is_empty() => base_from_operation_id(id, flags),
        _ => base_from_path(path, flags),
    };
    format!("{}{}{}", verb_prefix(method), base, suffix)
}

fn base_from_operation_id(operation_id: &str, flags: &NameFlags) -> String {
    let verb = Regex::new(r"(?i)^(get|post|put|delete|patch|options|head)_").unwrap();
    let name = verb.replace(operation_id, "");
    let extension = Regex::new(r"\.\w+$").unwrap();
    let name = extension.replace(&name, "");

    let segments: Vec<&str> = name.split('_').filter(|s| !s.is_empty()).collect();
    let filtered = filter_segments(&segments, flags);
    assemble(&filtered, flags)
}

fn base_from_path(path: &str, flags: &NameFlags) -> String {
    let clean = path.split('?').next().unwrap_or(path);
    let mut segments: Vec<String> = clean
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if let Some(last) = segments.last_mut() {
        let extension = Regex::new(r"\.\w+$").unwrap();
        *last = extension.replace(last, "").into_owned();
    }

    let refs: Vec<&str> = segments.iter().map(String::as_str).collect();
    let filtered = filter_segments(&refs, flags);
    assemble(&filtered, flags)
}

fn filter_segments<'a>(segments: &[&'a str], flags: &NameFlags) -> Vec<&'a str> {
    let version = Regex::new(r"^v\d+(\.\d+)*$").unwrap();
    segments
        .iter()
        .filter(|segment| {
            if !flags.include_api_in_name && segment.eq_ignore_ascii_case("api") {
                return false;
            }
            if !flags.include_version_in_name && version.is_match(segment) {
                return false;
            }
            true
        })
        .copied()
        .collect()
}

fn assemble(segments: &[&str], flags: &NameFlags) -> String {
    segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            // Path parameters are kept as-is: `{petId}` -> `PetId`.
            if let Some(inner) = segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
            {
                return capitalize(inner);
            }

            if flags.singularize_resource_names
                && should_singularize(index, segments.len())
                && segment.ends_with('s')
            {
                pascal_case(&singularize(segment))
            } else {
                pascal_case(segment)
            }
        })
        .collect()
}

// A segment is treated as a resource name (and singularized) when it is the
// first segment or any segment before the last; a trailing collection
// segment keeps its plural only when preceded by others.
fn should_singularize(index: usize, len: usize) -> bool {
    index == 0 || index + 1 < len
}

// Not general-purpose English: `ies` -> `y`, otherwise one trailing `s` is
// stripped. Words ending in `ss` get the same treatment.
fn singularize(segment: &str) -> String {
    if let Some(stem) = segment.strip_suffix("ies") {
        return format!("{stem}y");
    }
    segment.strip_suffix('s').unwrap_or(segment).to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// Uppercases at every non-alphanumeric boundary and drops the separators:
// `pet-store` -> `PetStore`, `v3` -> `V3`.
fn pascal_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut upper_next = true;
    for ch in segment.chars() {
        if ch.is_ascii_alphanumeric() {
            if upper_next {
                out.extend(ch.to_uppercase());
                upper_next = false;
            } else {
                out.push(ch);
            }
        } else {
            upper_next = true;
        }
    }
    out
}
