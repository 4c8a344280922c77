// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index builder: raw description in, published [`SearchIndex`] out.
//!
//! Always a full rebuild. The whole index is assembled in memory before a
//! single byte is written, so a description that fails validation leaves
//! the previously published file exactly as it was.

pub mod document;
pub mod operation;

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::config::DataPaths;
use crate::error::{DuplicateEndpointWarning, Error, Result, SchemaFormatError};
use crate::inverted::build_token_index;
use crate::storage::{records_checksum, save_index};
use crate::tokenize::FOLD_MODE;
use crate::types::{IndexMetadata, SchemaMetadata, SearchIndex, INDEX_FORMAT_VERSION};

pub use document::{Location, Node};
pub use operation::{extract_records, Extraction};

/// Version string used when neither the document nor its metadata has one.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Title used when the document has no `info.title`.
pub const DEFAULT_TITLE: &str = "API";

/// An index built in memory, not yet published.
#[derive(Debug)]
pub struct BuiltIndex {
    pub index: SearchIndex,
    pub warnings: Vec<DuplicateEndpointWarning>,
}

/// Outcome of a published rebuild.
#[derive(Debug)]
pub struct BuildReport {
    pub index_path: PathBuf,
    pub record_count: usize,
    pub token_count: usize,
    pub source_version: String,
    pub warnings: Vec<DuplicateEndpointWarning>,
}

/// Build an index from raw description bytes.
///
/// `fallback_version` is used as `sourceVersion` when the document carries
/// no `info.version`.
pub fn build_index(
    raw: &[u8],
    fallback_version: Option<&str>,
    built_at: DateTime<Utc>,
) -> std::result::Result<BuiltIndex, SchemaFormatError> {
    let root = Node::parse(raw)?;
    let Extraction { records, warnings } = extract_records(&root)?;

    let info = root.get("info");
    let info_str = |key: &str| info.and_then(|i| i.get(key)).and_then(Node::as_str);
    let source_version = info_str("version")
        .or(fallback_version)
        .unwrap_or(UNKNOWN_VERSION)
        .to_string();
    let title = info_str("title").unwrap_or(DEFAULT_TITLE).to_string();

    let token_index = build_token_index(&records);
    tracing::debug!(
        "extracted {} records, {} distinct tokens",
        records.len(),
        token_index.len()
    );

    let metadata = IndexMetadata {
        built_at,
        source_version,
        record_count: records.len(),
        format_version: INDEX_FORMAT_VERSION,
        title,
        fold_mode: FOLD_MODE.to_string(),
        checksum: records_checksum(&records),
    };

    Ok(BuiltIndex {
        index: SearchIndex {
            records,
            token_index,
            metadata,
        },
        warnings,
    })
}

/// Rebuild the index from the stored description and publish it.
pub fn rebuild(paths: &DataPaths) -> Result<BuildReport> {
    let raw = fs::read(&paths.schema).map_err(|e| Error::SchemaUnavailable {
        path: paths.schema.clone(),
        reason: e.to_string(),
    })?;

    let fallback = read_schema_metadata(paths).map(|meta| meta.version);
    let built = build_index(&raw, fallback.as_deref(), Utc::now())?;

    save_index(&built.index, &paths.index)?;

    Ok(BuildReport {
        index_path: paths.index.clone(),
        record_count: built.index.records.len(),
        token_count: built.index.token_index.len(),
        source_version: built.index.metadata.source_version.clone(),
        warnings: built.warnings,
    })
}

/// Adapter metadata, if present and readable. Only a version hint, so a
/// broken file is logged and skipped.
fn read_schema_metadata(paths: &DataPaths) -> Option<SchemaMetadata> {
    let bytes = fs::read(&paths.schema_metadata).ok()?;
    match serde_json::from_slice(&bytes) {
        Ok(meta) => Some(meta),
        Err(e) => {
            tracing::warn!(
                "ignoring unreadable {}: {}",
                paths.schema_metadata.display(),
                e
            );
            None
        }
    }
}
