//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use apidex::config::DataPaths;
use apidex::{build_index, EndpointRecord, SearchEngine, SearchIndex};
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

// ============================================================================
// FIXTURES
// ============================================================================

/// Directory containing the JSON description fixtures.
pub const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/fixtures");

/// A trimmed cloud-hosting description: services, deploys, postgres and friends.
pub const RENDER_SAMPLE: &str = "render-sample.json";

/// Repeats the same (method, path) pair inside and across path items.
pub const DUPLICATES: &str = "duplicates.json";

/// Structurally invalid: one operation has a string where `tags` should be an array.
pub const INVALID: &str = "invalid.json";

/// The two-operation description used by the scenario tests.
pub const POSTGRES_AND_SERVICES: &str = r#"{
    "info": {"title": "Scenario", "version": "1.0.0"},
    "paths": {
        "/v1/postgres": {
            "get": {"summary": "List Postgres databases", "tags": ["Postgres"]}
        },
        "/v1/services": {
            "post": {"summary": "Create a service", "tags": ["Services"]}
        }
    }
}"#;

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

pub fn fixture_bytes(name: &str) -> Vec<u8> {
    fs::read(fixture_path(name)).unwrap_or_else(|e| panic!("fixture {} unreadable: {}", name, e))
}

/// A fixed build time so two builds of the same input compare equal.
pub fn built_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap()
}

// ============================================================================
// BUILDERS
// ============================================================================

pub fn index_from_json(json: &str) -> SearchIndex {
    build_index(json.as_bytes(), None, built_at())
        .expect("description should build")
        .index
}

pub fn engine_from_json(json: &str) -> SearchEngine {
    SearchEngine::new(index_from_json(json))
}

pub fn engine_from_fixture(name: &str) -> SearchEngine {
    let built = build_index(&fixture_bytes(name), None, built_at()).expect("fixture should build");
    SearchEngine::new(built.index)
}

/// A temp data directory with `raw` stored as the description.
pub fn data_dir_with_schema(raw: &[u8]) -> (TempDir, DataPaths) {
    let dir = TempDir::new().unwrap();
    let paths = DataPaths::in_dir(dir.path());
    fs::write(&paths.schema, raw).unwrap();
    (dir, paths)
}

// ============================================================================
// ASSERTIONS
// ============================================================================

pub fn ids(records: &[&EndpointRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}

/// Every token maps to at least one id and every id exists.
pub fn assert_index_well_formed(index: &SearchIndex) {
    assert_eq!(index.metadata.record_count, index.records.len());
    for (token, listed) in &index.token_index {
        assert!(!listed.is_empty(), "token '{}' has no ids", token);
        for id in listed {
            assert!(
                index.records.iter().any(|r| &r.id == id),
                "token '{}' points at unknown id '{}'",
                token,
                id
            );
        }
    }
}
