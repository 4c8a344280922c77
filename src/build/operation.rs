// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Flattening a parsed description into endpoint records.
//!
//! Walks `paths` in document order and, inside each path item, the
//! recognised methods in [`HttpMethod::ALL`] order. Only the handful of
//! fields a record needs are read; everything else in the document is
//! ignored. Anything that is present but has the wrong shape aborts the
//! walk with a [`SchemaFormatError`] naming its location.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use super::document::{Location, Node};
use crate::error::{DuplicateEndpointWarning, SchemaFormatError};
use crate::types::{endpoint_id, EndpointRecord, HttpMethod};

/// Records in enumeration order plus the duplicates that were collapsed.
#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<EndpointRecord>,
    pub warnings: Vec<DuplicateEndpointWarning>,
}

/// Extract every (method, path) pair of `root` as an [`EndpointRecord`].
pub fn extract_records(root: &Node) -> Result<Extraction, SchemaFormatError> {
    if root.as_object().is_none() {
        return Err(Location::root().error(format!("expected an object, found {}", root.kind())));
    }

    let paths_loc = Location::root().key("paths");
    let paths = root
        .get("paths")
        .ok_or_else(|| paths_loc.error("missing required field"))?;
    let path_items = paths
        .as_object()
        .ok_or_else(|| paths_loc.error(format!("expected an object, found {}", paths.kind())))?;

    let default_auth = document_requires_auth(root)?;

    let mut records: IndexMap<String, EndpointRecord> = IndexMap::new();
    let mut warnings = Vec::new();

    for (path, item) in path_items {
        let item_loc = paths_loc.key(path);
        if !path.starts_with('/') {
            return Err(item_loc.error("path template must start with '/'"));
        }
        let entries = item
            .as_object()
            .ok_or_else(|| item_loc.error(format!("expected an object, found {}", item.kind())))?;

        let shared_params = match item.get("parameters") {
            Some(node) => parameter_keys(root, node, &item_loc.key("parameters"))?,
            None => BTreeSet::new(),
        };

        // Within one path item, a later key for the same method replaces the
        // earlier one ("get" and "GET" collide too).
        // The source key is kept so later warnings point at what was written.
        let mut by_method: IndexMap<HttpMethod, (&str, EndpointRecord)> = IndexMap::new();
        for (key, operation) in entries {
            let Some(method) = HttpMethod::from_key(key) else {
                continue;
            };
            let op_loc = item_loc.key(key);
            let context = OperationContext {
                root,
                path,
                method,
                location: &op_loc,
                shared_params: &shared_params,
                default_auth,
            };
            let record = context.build(operation)?;
            if by_method.insert(method, (key.as_str(), record)).is_some() {
                warnings.push(duplicate(method, path, &op_loc));
            }
        }
        by_method.sort_keys();

        for (method, (key, record)) in by_method {
            if records.insert(record.id.clone(), record).is_some() {
                warnings.push(duplicate(method, path, &item_loc.key(key)));
            }
        }
    }

    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    Ok(Extraction {
        records: records.into_values().collect(),
        warnings,
    })
}

fn duplicate(method: HttpMethod, path: &str, location: &Location) -> DuplicateEndpointWarning {
    DuplicateEndpointWarning {
        id: endpoint_id(method, path),
        location: location.to_string(),
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

struct OperationContext<'a> {
    root: &'a Node,
    path: &'a str,
    method: HttpMethod,
    location: &'a Location,
    shared_params: &'a BTreeSet<ParamKey>,
    default_auth: bool,
}

impl OperationContext<'_> {
    fn build(&self, operation: &Node) -> Result<EndpointRecord, SchemaFormatError> {
        let loc = self.location;
        if operation.as_object().is_none() {
            return Err(loc.error(format!("expected an object, found {}", operation.kind())));
        }

        let summary = optional_string(operation, "summary", loc)?;
        let description = optional_string(operation, "description", loc)?;
        let operation_id = optional_string(operation, "operationId", loc)?;
        let tags = tag_list(operation, loc)?;

        let mut params = self.shared_params.clone();
        if let Some(node) = operation.get("parameters") {
            params.extend(parameter_keys(self.root, node, &loc.key("parameters"))?);
        }
        let parameter_count = params.iter().filter(|p| p.is_query_or_path()).count();

        let has_request_body = match operation.get("requestBody") {
            None => false,
            Some(Node::Object(_)) => true,
            Some(other) => {
                return Err(loc
                    .key("requestBody")
                    .error(format!("expected an object, found {}", other.kind())))
            }
        };

        let requires_auth = match operation.get("security") {
            Some(node) => requirement_present(node, &loc.key("security"))?,
            None => self.default_auth,
        };

        let deprecated = match operation.get("deprecated") {
            None => false,
            Some(Node::Bool(flag)) => *flag,
            Some(other) => {
                return Err(loc
                    .key("deprecated")
                    .error(format!("expected a boolean, found {}", other.kind())))
            }
        };

        Ok(EndpointRecord {
            id: endpoint_id(self.method, self.path),
            method: self.method,
            path: self.path.to_string(),
            summary,
            tags,
            parameter_count,
            has_request_body,
            requires_auth,
            operation_id,
            description,
            deprecated,
        })
    }
}

fn optional_string(node: &Node, key: &str, loc: &Location) -> Result<String, SchemaFormatError> {
    match node.get(key) {
        None => Ok(String::new()),
        Some(Node::String(s)) => Ok(s.clone()),
        Some(other) => Err(loc
            .key(key)
            .error(format!("expected a string, found {}", other.kind()))),
    }
}

/// Tags in first-seen order with exact duplicates collapsed.
fn tag_list(operation: &Node, loc: &Location) -> Result<Vec<String>, SchemaFormatError> {
    let Some(node) = operation.get("tags") else {
        return Ok(Vec::new());
    };
    let tags_loc = loc.key("tags");
    let items = node
        .as_array()
        .ok_or_else(|| tags_loc.error(format!("expected an array of strings, found {}", node.kind())))?;

    let mut tags: Vec<String> = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let tag = item.as_str().ok_or_else(|| {
            tags_loc
                .index(i)
                .error(format!("expected a string, found {}", item.kind()))
        })?;
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    Ok(tags)
}

// =============================================================================
// PARAMETERS
// =============================================================================

/// Identity of a declared parameter, used to merge path-level and
/// operation-level lists.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum ParamKey {
    Declared { name: String, location: String },
    /// A `$ref` that could not be resolved within the document.
    Unresolved(String),
}

impl ParamKey {
    fn is_query_or_path(&self) -> bool {
        match self {
            ParamKey::Declared { location, .. } => location == "query" || location == "path",
            ParamKey::Unresolved(_) => true,
        }
    }
}

fn parameter_keys(root: &Node, node: &Node, loc: &Location) -> Result<BTreeSet<ParamKey>, SchemaFormatError> {
    let items = node
        .as_array()
        .ok_or_else(|| loc.error(format!("expected an array, found {}", node.kind())))?;

    let mut keys = BTreeSet::new();
    for (i, item) in items.iter().enumerate() {
        if item.as_object().is_none() {
            return Err(loc
                .index(i)
                .error(format!("expected an object, found {}", item.kind())));
        }
        let resolved = match item.get("$ref").and_then(Node::as_str) {
            Some(reference) => match root.pointer(reference) {
                Some(target) if target.as_object().is_some() => target,
                _ => {
                    tracing::debug!("unresolved parameter reference {} at {}", reference, loc.index(i));
                    keys.insert(ParamKey::Unresolved(reference.to_string()));
                    continue;
                }
            },
            None => item,
        };
        keys.insert(ParamKey::Declared {
            name: resolved.get("name").and_then(Node::as_str).unwrap_or_default().to_string(),
            location: resolved.get("in").and_then(Node::as_str).unwrap_or_default().to_string(),
        });
    }
    Ok(keys)
}

// =============================================================================
// SECURITY
// =============================================================================

/// Whether a `security` value demands credentials.
///
/// Arrays list alternatives; an empty array or one holding only `{}` means
/// auth is off or optional.
fn requirement_present(node: &Node, loc: &Location) -> Result<bool, SchemaFormatError> {
    match node {
        Node::Object(entries) => Ok(!entries.is_empty()),
        Node::Array(items) => {
            let mut required = false;
            for (i, item) in items.iter().enumerate() {
                let entries = item.as_object().ok_or_else(|| {
                    loc.index(i)
                        .error(format!("expected an object, found {}", item.kind()))
                })?;
                required |= !entries.is_empty();
            }
            Ok(required)
        }
        other => Err(loc.error(format!("expected an object or array, found {}", other.kind()))),
    }
}

/// Document-wide default for operations without their own `security`.
fn document_requires_auth(root: &Node) -> Result<bool, SchemaFormatError> {
    if let Some(node) = root.get("security") {
        return requirement_present(node, &Location::root().key("security"));
    }
    let schemes = root
        .get("components")
        .and_then(|c| c.get("securitySchemes"))
        .and_then(Node::as_object);
    Ok(schemes.is_some_and(|entries| !entries.is_empty()))
}
