// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Permissive reader for the raw API description.
//!
//! `serde_json::Value` silently collapses repeated object keys, which would
//! hide exactly the duplicates the builder has to report. [`Node`] keeps
//! objects as ordered `(key, value)` lists instead, so a path or method that
//! appears twice is still visible. Nothing of this type escapes the
//! `build` module; records are extracted from it and it is dropped.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::error::SchemaFormatError;

/// A JSON value whose objects preserve order and duplicate keys.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Node>),
    Object(Vec<(String, Node)>),
}

impl Node {
    /// Parse a document from raw bytes. Syntax errors are reported against
    /// the document root with serde_json's line/column.
    pub fn parse(bytes: &[u8]) -> Result<Node, SchemaFormatError> {
        serde_json::from_slice(bytes)
            .map_err(|e| SchemaFormatError::new("$", format!("invalid JSON: {}", e)))
    }

    /// Last value stored under `key`, if this is an object.
    ///
    /// Repeated keys resolve last-wins, the same way a JSON parser would.
    /// `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Object(entries) => entries
                .iter()
                .rev()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v)
                .filter(|v| !matches!(v, Node::Null)),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, Node)]> {
        match self {
            Node::Object(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// Follow a `#/a/b/c` JSON pointer from this node.
    pub fn pointer(&self, reference: &str) -> Option<&Node> {
        let rest = reference.strip_prefix("#/")?;
        rest.split('/').try_fold(self, |node, raw| {
            let key = raw.replace("~1", "/").replace("~0", "~");
            node.get(&key)
        })
    }

    /// Short description used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "a boolean",
            Node::Number(_) => "a number",
            Node::String(_) => "a string",
            Node::Array(_) => "an array",
            Node::Object(_) => "an object",
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_none<E>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
        Node::deserialize(deserializer)
    }

    fn visit_bool<E>(self, v: bool) -> Result<Node, E> {
        Ok(Node::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Node, E> {
        Ok(Node::Number(v as f64))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Node, E> {
        Ok(Node::Number(v as f64))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Node, E> {
        Ok(Node::Number(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Node, E> {
        Ok(Node::String(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Node, E> {
        Ok(Node::String(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Node::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Node>()? {
            entries.push((key, value));
        }
        Ok(Node::Object(entries))
    }
}

// =============================================================================
// LOCATIONS
// =============================================================================

/// Human-readable location inside the document: `paths."/v1/x".get.tags[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location(String);

impl Location {
    pub fn root() -> Self {
        Location("$".to_string())
    }

    /// Descend into an object key. Keys that are not plain identifiers are
    /// quoted.
    pub fn key(&self, key: &str) -> Self {
        let plain = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '$');
        let segment = if plain {
            key.to_string()
        } else {
            format!("{:?}", key)
        };
        if self.0 == "$" {
            Location(segment)
        } else {
            Location(format!("{}.{}", self.0, segment))
        }
    }

    pub fn index(&self, i: usize) -> Self {
        Location(format!("{}[{}]", self.0, i))
    }

    pub fn error(&self, reason: impl Into<String>) -> SchemaFormatError {
        SchemaFormatError::new(self.0.clone(), reason)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
