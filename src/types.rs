// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of an endpoint index.
//!
//! An API description is flattened into one [`EndpointRecord`] per
//! (method, path) pair. Records, the token → id mapping and a small metadata
//! block together form the [`SearchIndex`], the only artifact the search side
//! ever reads.
//!
//! # Invariants
//!
//! - **EndpointRecord**: `id == endpoint_id(method, path)`. Ids are unique
//!   across `records`; duplicates in the source are collapsed last-wins
//!   before a record ever lands here.
//!
//! - **SearchIndex**: `metadata.record_count == records.len()`, every id in
//!   `token_index` names a record, and no token maps to an empty list.
//!
//! - **Ordering**: `records` is in enumeration order (document path order,
//!   then [`HttpMethod::ALL`] order). Search uses that position as the
//!   tie-break, so it must never be re-sorted after a build.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Version of the on-disk index layout. Bumped whenever tokenization or the
/// record shape changes, so an older file is rejected instead of misread.
pub const INDEX_FORMAT_VERSION: u32 = 1;

// =============================================================================
// HTTP METHODS
// =============================================================================

/// HTTP verbs an operation can be declared under.
///
/// Declaration order of the variants is the enumeration order within a path
/// item, which in turn is the tie-break order for equal search scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    /// All methods in enumeration order.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Trace,
    ];

    /// Case-insensitive lookup of a path item key.
    ///
    /// Returns `None` for keys that are not operations (`parameters`,
    /// `servers`, `x-*` extensions and so on).
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(key))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable addressing key for an endpoint: `"GET /v1/services"`.
pub fn endpoint_id(method: HttpMethod, path: &str) -> String {
    format!("{} {}", method, path)
}

// =============================================================================
// RECORDS
// =============================================================================

/// One (method, path) pair extracted from an API description.
///
/// Optional source fields are materialized as empty strings, empty lists or
/// `false`, never omitted, so consumers of the index file can rely on every
/// key being present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRecord {
    pub id: String,
    pub method: HttpMethod,
    pub path: String,
    pub summary: String,
    /// Category labels, first-seen order, exact duplicates collapsed.
    pub tags: Vec<String>,
    pub parameter_count: usize,
    pub has_request_body: bool,
    pub requires_auth: bool,
    #[serde(default)]
    pub operation_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub deprecated: bool,
}

impl EndpointRecord {
    /// Case-insensitive exact tag match.
    pub fn has_tag(&self, category: &str) -> bool {
        self.tags.iter().any(|tag| tag.to_lowercase() == category.to_lowercase())
    }
}

// =============================================================================
// PERSISTED INDEX
// =============================================================================

/// Build metadata stored alongside the records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexMetadata {
    pub built_at: DateTime<Utc>,
    pub source_version: String,
    pub record_count: usize,
    pub format_version: u32,
    pub title: String,
    /// Case folding the tokens were built with, see `tokenize::FOLD_MODE`.
    pub fold_mode: String,
    /// CRC32 of the compact JSON encoding of `records`, 8 hex digits.
    pub checksum: String,
}

/// The persisted artifact: records, token index and metadata.
///
/// Built fresh by every rebuild and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndex {
    pub records: Vec<EndpointRecord>,
    /// Token → ids of the records containing it, ids in record order.
    pub token_index: BTreeMap<String, Vec<String>>,
    pub metadata: IndexMetadata,
}

/// Written next to the raw description by the schema source adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaMetadata {
    pub last_updated: DateTime<Utc>,
    /// Origin identifier: the URL or file path the description came from.
    pub source: String,
    pub version: String,
}

// =============================================================================
// AGGREGATES
// =============================================================================

/// Aggregate counts derived from a loaded [`SearchIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub total_endpoints: usize,
    pub tag_counts: BTreeMap<String, usize>,
    pub untagged: usize,
    pub method_counts: BTreeMap<HttpMethod, usize>,
    pub auth_required: usize,
    pub deprecated: usize,
    pub built_at: DateTime<Utc>,
    pub source_version: String,
    pub title: String,
}
