//! Field weights: path over tags over summary.

use crate::common::{engine_from_fixture, engine_from_json, ids, RENDER_SAMPLE};
use apidex::{Limit, Query, PATH_WEIGHT, SUMMARY_WEIGHT, TAG_WEIGHT};

#[test]
fn test_path_match_beats_summary_match() {
    // The summary-only record is declared first, so order alone would favor it.
    let engine = engine_from_json(
        r#"{"paths": {
            "/v1/overview": {"get": {"summary": "Count widgets"}},
            "/v1/widgets": {"get": {}}
        }}"#,
    );
    assert_eq!(
        ids(&engine.query("widgets", None, Limit::Unlimited)),
        vec!["GET /v1/widgets", "GET /v1/overview"]
    );
}

#[test]
fn test_tag_match_beats_summary_match() {
    let engine = engine_from_json(
        r#"{"paths": {
            "/v1/a": {"get": {"summary": "billing report"}},
            "/v1/b": {"get": {"tags": ["Billing"]}}
        }}"#,
    );
    assert_eq!(ids(&engine.query("billing", None, Limit::Unlimited)), vec!["GET /v1/b", "GET /v1/a"]);
}

#[test]
fn test_scores_sum_field_weights() {
    let engine = engine_from_fixture(RENDER_SAMPLE);
    let results = engine.search(&Query::new("postgres").limit(Limit::Unlimited));
    let scored: Vec<(&str, u32)> = results.hits.iter().map(|h| (h.record.id.as_str(), h.score)).collect();
    let all = PATH_WEIGHT + TAG_WEIGHT + SUMMARY_WEIGHT;
    assert_eq!(
        scored,
        vec![
            ("GET /v1/postgres", all),
            ("POST /v1/postgres", all),
            ("GET /v1/postgres/{postgresId}/connection-info", PATH_WEIGHT + TAG_WEIGHT),
        ]
    );
}

#[test]
fn test_each_distinct_query_token_adds() {
    let engine = engine_from_fixture(RENDER_SAMPLE);
    let hits = engine.search(&Query::new("key value").limit(Limit::Unlimited)).hits;
    assert_eq!(hits[0].record.id, "GET /v1/key-value");
    assert_eq!(hits[0].score, 2 * (PATH_WEIGHT + TAG_WEIGHT + SUMMARY_WEIGHT));

    // Repeating a token does not count it twice.
    let repeated = engine.search(&Query::new("key key value").limit(Limit::Unlimited)).hits;
    assert_eq!(repeated[0].score, hits[0].score);
}

#[test]
fn test_equal_scores_keep_enumeration_order() {
    let engine = engine_from_fixture(RENDER_SAMPLE);
    let found = engine.query("service", None, Limit::Unlimited);
    let positions: Vec<usize> = found
        .iter()
        .map(|r| engine.list_all(None).iter().position(|x| x.id == r.id).unwrap())
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    // All "service" hits score 1 (summary only), so ranking is enumeration order.
    assert_eq!(positions, sorted);
    assert!(found.len() >= 4);
}
