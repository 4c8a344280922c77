//! The two-endpoint Postgres/Services scenario, end to end.

use std::collections::BTreeMap;

use crate::common::{data_dir_with_schema, engine_from_json, ids, POSTGRES_AND_SERVICES};
use apidex::{rebuild, Limit, SearchEngine};

#[test]
fn test_query_postgres() {
    let engine = engine_from_json(POSTGRES_AND_SERVICES);
    assert_eq!(ids(&engine.query("postgres", None, Limit::default())), vec!["GET /v1/postgres"]);
}

#[test]
fn test_query_service_matches_summary_word() {
    let engine = engine_from_json(POSTGRES_AND_SERVICES);
    // "service" is a summary word; the path and tag say "services".
    assert_eq!(ids(&engine.query("service", None, Limit::default())), vec!["POST /v1/services"]);
}

#[test]
fn test_tag_counts() {
    let engine = engine_from_json(POSTGRES_AND_SERVICES);
    let expected: BTreeMap<String, usize> =
        [("Postgres".to_string(), 1), ("Services".to_string(), 1)].into_iter().collect();
    assert_eq!(engine.stats().tag_counts, expected);
}

#[test]
fn test_scenario_through_published_file() {
    let (_dir, paths) = data_dir_with_schema(POSTGRES_AND_SERVICES.as_bytes());
    rebuild(&paths).unwrap();

    let engine = SearchEngine::open(&paths.index).unwrap();
    assert_eq!(ids(&engine.query("postgres", None, Limit::Unlimited)), vec!["GET /v1/postgres"]);
    assert_eq!(ids(&engine.query("service", None, Limit::Unlimited)), vec!["POST /v1/services"]);
    assert_eq!(engine.stats().total_endpoints, 2);
}

#[test]
fn test_case_and_diacritics_fold() {
    let engine = engine_from_json(POSTGRES_AND_SERVICES);
    assert_eq!(ids(&engine.query("POSTGRES", None, Limit::default())), vec!["GET /v1/postgres"]);
    assert_eq!(ids(&engine.query("Pöstgres", None, Limit::default())), vec!["GET /v1/postgres"]);
}
