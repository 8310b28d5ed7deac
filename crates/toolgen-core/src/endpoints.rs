//! Flat endpoint inventory over a parsed document.

use crate::document::Document;
use serde::Serialize;

/// One operation surfaced by the inventory.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSummary {
    pub path: String,
    /// Upper-cased HTTP method.
    pub method: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub operation_id: Option<String>,
    pub tags: Vec<String>,
}

/// List every path+method combination in document order.
#[must_use]
pub fn list(document: &Document) -> Vec<EndpointSummary> {
    let mut endpoints = Vec::new();
    for (path, item) in &document.paths {
        for (method, operation) in &item.operations {
            endpoints.push(EndpointSummary {
                path: path.clone(),
                method: method.to_ascii_uppercase(),
                summary: operation.summary.clone(),
                description: operation.description.clone(),
                operation_id: operation.operation_id.clone(),
                tags: operation.tags.clone(),
            });
        }
    }
    endpoints
}
