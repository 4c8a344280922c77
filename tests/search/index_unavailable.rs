//! A missing or damaged index is never trusted.

use std::fs;

use crate::common::{data_dir_with_schema, fixture_bytes, RENDER_SAMPLE};
use apidex::{rebuild, Error, SearchEngine};

fn published() -> (tempfile::TempDir, apidex::config::DataPaths) {
    let (dir, paths) = data_dir_with_schema(&fixture_bytes(RENDER_SAMPLE));
    rebuild(&paths).unwrap();
    (dir, paths)
}

fn edit_index(path: &std::path::Path, edit: impl FnOnce(&mut serde_json::Value)) {
    let mut value: serde_json::Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
    edit(&mut value);
    fs::write(path, serde_json::to_vec(&value).unwrap()).unwrap();
}

#[test]
fn test_missing_index_asks_for_rebuild() {
    let (_dir, paths) = data_dir_with_schema(b"{}");
    let err = SearchEngine::open(&paths.index).unwrap_err();
    assert!(err.to_string().starts_with("IndexUnavailableError"));
    assert!(err.to_string().contains("apidex rebuild"));

    let err = Error::from(err);
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_truncated_index() {
    let (_dir, paths) = published();
    let bytes = fs::read(&paths.index).unwrap();
    fs::write(&paths.index, &bytes[..bytes.len() / 2]).unwrap();
    assert!(SearchEngine::open(&paths.index).is_err());
}

#[test]
fn test_edited_record_fails_checksum() {
    let (_dir, paths) = published();
    edit_index(&paths.index, |v| v["records"][0]["summary"] = "tampered".into());
    let err = SearchEngine::open(&paths.index).unwrap_err();
    assert!(err.reason.contains("checksum"), "{}", err.reason);
}

#[test]
fn test_dangling_token_reference() {
    let (_dir, paths) = published();
    edit_index(&paths.index, |v| {
        v["tokenIndex"]["postgres"] = serde_json::json!(["GET /v1/nowhere"]);
    });
    let err = SearchEngine::open(&paths.index).unwrap_err();
    assert!(err.reason.contains("unknown id"), "{}", err.reason);
}

#[test]
fn test_missing_metadata_field() {
    let (_dir, paths) = published();
    edit_index(&paths.index, |v| {
        v["metadata"].as_object_mut().unwrap().remove("recordCount");
    });
    let err = SearchEngine::open(&paths.index).unwrap_err();
    assert!(err.reason.starts_with("malformed index"), "{}", err.reason);
}

#[test]
fn test_unknown_format_version() {
    let (_dir, paths) = published();
    edit_index(&paths.index, |v| v["metadata"]["formatVersion"] = 99.into());
    let err = SearchEngine::open(&paths.index).unwrap_err();
    assert!(err.reason.starts_with("format version"), "{}", err.reason);
}

#[test]
fn test_removed_token_entry() {
    let (_dir, paths) = published();
    edit_index(&paths.index, |v| {
        v["tokenIndex"].as_object_mut().unwrap().remove("postgres");
    });
    let err = SearchEngine::open(&paths.index).unwrap_err();
    assert!(err.to_string().starts_with("IndexUnavailableError"));
    assert_eq!(err.reason, "token 'postgres' is missing");
    assert_eq!(Error::from(err).exit_code(), 3);
}

#[test]
fn test_extra_token_entry() {
    let (_dir, paths) = published();
    edit_index(&paths.index, |v| {
        v["tokenIndex"]["zebra"] = serde_json::json!(["GET /v1/postgres"]);
    });
    let err = SearchEngine::open(&paths.index).unwrap_err();
    assert!(err.reason.contains("'zebra'"), "{}", err.reason);
}

#[test]
fn test_index_folded_differently() {
    let (_dir, paths) = published();
    edit_index(&paths.index, |v| v["metadata"]["foldMode"] = "ascii-only".into());
    let err = SearchEngine::open(&paths.index).unwrap_err();
    assert!(err.reason.contains("case folding"), "{}", err.reason);
}
