// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Schema source adapter: get the raw description onto disk.
//!
//! Pure I/O. The body is checked to be JSON before anything is written, so a
//! captive-portal page or a truncated download never replaces a good
//! description. Bytes are stored verbatim; only `info.version` is peeked at
//! for the metadata file.

use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;

use crate::config::DataPaths;
use crate::error::{Error, Result};
use crate::storage::{write_atomic, write_json_atomic};
use crate::types::SchemaMetadata;

/// Network timeout for a remote description.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct VersionProbe {
    #[serde(default)]
    info: Option<InfoProbe>,
}

#[derive(Deserialize)]
struct InfoProbe {
    #[serde(default)]
    version: Option<serde_json::Value>,
}

/// Whether `source` should be fetched over HTTP rather than read from disk.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Download (or copy) a description and store it with its metadata.
pub fn fetch_schema(source: &str, paths: &DataPaths) -> Result<SchemaMetadata> {
    let bytes = if is_remote(source) {
        download(source)?
    } else {
        fs::read(source).map_err(|e| Error::Fetch(format!("{}: {}", source, e)))?
    };

    let version = probe_version(&bytes)
        .map_err(|e| Error::Fetch(format!("{} did not return JSON: {}", source, e)))?;

    store_schema(&bytes, source, version, &paths.schema, &paths.schema_metadata)
}

fn download(url: &str) -> Result<Vec<u8>> {
    tracing::info!("downloading {}", url);
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| Error::Fetch(format!("failed to create client: {}", e)))?;

    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(|e| Error::Fetch(format!("request failed: {}", e)))?;

    let body = response
        .bytes()
        .map_err(|e| Error::Fetch(format!("failed to read response: {}", e)))?;
    Ok(body.to_vec())
}

/// `info.version` of a JSON document, "unknown" when absent. Errors only if
/// the bytes are not JSON at all.
fn probe_version(bytes: &[u8]) -> std::result::Result<String, serde_json::Error> {
    let probe: VersionProbe = match serde_json::from_slice(bytes) {
        Ok(probe) => probe,
        // Valid JSON but not an object (or `info` of the wrong shape).
        Err(e) if e.is_data() => VersionProbe { info: None },
        Err(e) => return Err(e),
    };
    let version = probe.info.and_then(|info| info.version).map(|v| match v {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    });
    Ok(version.unwrap_or_else(|| crate::build::UNKNOWN_VERSION.to_string()))
}

/// Write the raw bytes and the metadata record, each atomically.
fn store_schema(
    bytes: &[u8],
    source: &str,
    version: String,
    schema_path: &Path,
    metadata_path: &Path,
) -> Result<SchemaMetadata> {
    write_atomic(schema_path, bytes)?;
    let metadata = SchemaMetadata {
        last_updated: Utc::now(),
        source: source.to_string(),
        version,
    };
    write_json_atomic(metadata_path, &metadata)?;
    tracing::info!(
        "stored {} bytes from {} at {}",
        bytes.len(),
        source,
        schema_path.display()
    );
    Ok(metadata)
}
