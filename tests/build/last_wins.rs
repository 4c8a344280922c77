//! Duplicate (method, path) declarations collapse to the later one.

use crate::common::{built_at, fixture_bytes, DUPLICATES};
use apidex::build_index;

#[test]
fn test_later_declaration_wins() {
    let built = build_index(&fixture_bytes(DUPLICATES), None, built_at()).unwrap();
    let records = &built.index.records;

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["GET /v1/jobs", "POST /v1/jobs", "GET /v1/cron"]);

    // Same path item, repeated key.
    assert_eq!(records[0].summary, "List jobs");
    assert_eq!(records[0].tags, vec!["Jobs".to_string()]);

    // Path item repeated later in the document; first position kept.
    assert_eq!(records[1].summary, "Create a one-off job");
    assert!(records[1].has_request_body);
}

#[test]
fn test_each_duplicate_is_reported() {
    let built = build_index(&fixture_bytes(DUPLICATES), None, built_at()).unwrap();
    let ids: Vec<&str> = built.warnings.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["GET /v1/jobs", "POST /v1/jobs"]);
    assert!(built.warnings.iter().all(|w| w.location.contains("/v1/jobs")));
    assert!(built.warnings[0].to_string().starts_with("DuplicateEndpointWarning"));
}

#[test]
fn test_repeated_path_item_warning_names_written_key() {
    let built = build_index(&fixture_bytes(DUPLICATES), None, built_at()).unwrap();
    let location = &built.warnings[1].location;
    assert!(location.ends_with(".post"), "{}", location);
    assert!(!location.contains("POST"), "{}", location);

    let raw = br#"{"paths": {
        "/v1/keys": {"Put": {"summary": "Replace a key"}},
        "/v1/keys": {"pUT": {"summary": "Replace a key again"}}
    }}"#;
    let built = build_index(raw, None, built_at()).unwrap();
    assert_eq!(built.warnings.len(), 1);
    assert!(built.warnings[0].location.ends_with(".pUT"), "{}", built.warnings[0].location);
    assert_eq!(built.index.records[0].summary, "Replace a key again");
}

#[test]
fn test_old_summary_is_not_searchable() {
    let built = build_index(&fixture_bytes(DUPLICATES), None, built_at()).unwrap();
    let index = built.index;
    assert!(!index.token_index.contains_key("old"));
    assert!(!index.token_index.contains_key("legacy"));
    assert_eq!(index.metadata.record_count, 3);
}
