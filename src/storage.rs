// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reading and publishing the index file.
//!
//! Publishing goes through a temp file in the destination directory that is
//! renamed over the target, so a concurrent reader sees either the old file
//! or the new one, never a torn write. Loading trusts nothing: the JSON must
//! parse, the format version and fold mode must match this build, the
//! checksum over `records` must agree, and the token index must be exactly
//! what the records derive. Any failure
//! is an [`IndexUnavailableError`]; there is no partial recovery.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::IndexUnavailableError;
use crate::inverted::validate_token_index;
use crate::tokenize::FOLD_MODE;
use crate::types::{endpoint_id, EndpointRecord, SearchIndex, INDEX_FORMAT_VERSION};

/// CRC32 over the compact JSON encoding of `records`, as 8 hex digits.
pub fn records_checksum(records: &[EndpointRecord]) -> String {
    // Serializing plain structs and strings into a Vec cannot fail.
    let bytes = serde_json::to_vec(records).unwrap_or_default();
    format!("{:08x}", crc32fast::hash(&bytes))
}

/// Write `bytes` to `path` atomically, creating parent directories.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Pretty-print `value` as JSON and publish it atomically.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let mut encoded = serde_json::to_vec_pretty(value).map_err(io::Error::other)?;
    encoded.push(b'\n');
    write_atomic(path, &encoded)
}

/// Publish a finished index.
pub fn save_index(index: &SearchIndex, path: &Path) -> io::Result<()> {
    write_json_atomic(path, index)?;
    tracing::info!("published {} records to {}", index.records.len(), path.display());
    Ok(())
}

/// Load and fully validate an index file.
pub fn load_index(path: &Path) -> Result<SearchIndex, IndexUnavailableError> {
    let unavailable = |reason: String| IndexUnavailableError::new(path, reason);

    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => unavailable("file not found".to_string()),
        _ => unavailable(format!("unreadable: {}", e)),
    })?;
    let index: SearchIndex =
        serde_json::from_slice(&bytes).map_err(|e| unavailable(format!("malformed index: {}", e)))?;

    validate_index(&index).map_err(unavailable)?;
    tracing::debug!("loaded {} records from {}", index.records.len(), path.display());
    Ok(index)
}

/// Structural validation of a deserialized index.
pub fn validate_index(index: &SearchIndex) -> Result<(), String> {
    let meta = &index.metadata;
    if meta.format_version != INDEX_FORMAT_VERSION {
        return Err(format!(
            "format version {} (expected {})",
            meta.format_version, INDEX_FORMAT_VERSION
        ));
    }
    if meta.record_count != index.records.len() {
        return Err(format!(
            "metadata claims {} records but file holds {}",
            meta.record_count,
            index.records.len()
        ));
    }
    if meta.fold_mode != FOLD_MODE {
        return Err(format!(
            "built with '{}' case folding, this build uses '{}'",
            meta.fold_mode, FOLD_MODE
        ));
    }
    let actual = records_checksum(&index.records);
    if meta.checksum != actual {
        return Err(format!("checksum mismatch ({} != {})", meta.checksum, actual));
    }

    let mut ids = HashSet::with_capacity(index.records.len());
    for record in &index.records {
        if record.id != endpoint_id(record.method, &record.path) {
            return Err(format!("record id '{}' does not match its method and path", record.id));
        }
        if !ids.insert(record.id.as_str()) {
            return Err(format!("duplicate record id '{}'", record.id));
        }
    }

    validate_token_index(&index.token_index, &index.records)
}
