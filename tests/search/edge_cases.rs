//! Empty queries, unknown tokens and limits.

use crate::common::{engine_from_fixture, engine_from_json, ids, RENDER_SAMPLE};
use apidex::{Limit, Query};

#[test]
fn test_empty_and_punctuation_queries() {
    let engine = engine_from_fixture(RENDER_SAMPLE);
    for text in ["", "!!!", "   ", "a", "/ {} -", "x y z"] {
        assert!(engine.query(text, None, Limit::Unlimited).is_empty(), "query {:?}", text);
        assert_eq!(engine.search(&Query::new(text)).total_matches, 0);
    }
}

#[test]
fn test_path_segment_round_trip() {
    let engine = engine_from_json(
        r#"{"paths": {
            "/v1/widgets/{widgetId}": {"get": {}},
            "/v1/gadgets": {"get": {"summary": "List gadgets"}}
        }}"#,
    );
    assert_eq!(
        ids(&engine.query("widgets", None, Limit::Unlimited)),
        vec!["GET /v1/widgets/{widgetId}"]
    );
    assert!(engine.query("sprockets", None, Limit::Unlimited).is_empty());
    // Placeholder names are not searchable.
    assert!(engine.query("widgetId", None, Limit::Unlimited).is_empty());
}

#[test]
fn test_punctuation_inside_query_is_a_separator() {
    let engine = engine_from_fixture(RENDER_SAMPLE);
    let found = engine.query("connection-info", None, Limit::Unlimited);
    assert_eq!(found[0].id, "GET /v1/postgres/{postgresId}/connection-info");
}

#[test]
fn test_limit_caps_and_unlimited_returns_all() {
    let engine = engine_from_fixture(RENDER_SAMPLE);
    let all = engine.query("v1", None, Limit::Unlimited);
    assert_eq!(all.len(), 14);
    assert_eq!(engine.query("v1", None, Limit::Top(3)).len(), 3);
    assert_eq!(engine.query("v1", None, Limit::default()).len(), 10);

    let results = engine.search(&Query::new("v1"));
    assert_eq!(results.total_matches, 14);
    assert_eq!(results.truncated(), 4);
}

#[test]
fn test_hide_deprecated() {
    let engine = engine_from_fixture(RENDER_SAMPLE);
    let shown = engine.query("blueprint", None, Limit::Unlimited);
    assert_eq!(ids(&shown), vec!["POST /v1/blueprints/validate"]);
    let hidden = engine.search(&Query::new("blueprint").hide_deprecated(true));
    assert!(hidden.hits.is_empty());
}

#[test]
fn test_empty_index() {
    let engine = engine_from_json(r#"{"paths": {}}"#);
    assert!(engine.query("anything", None, Limit::Unlimited).is_empty());
    assert!(engine.list_all(None).is_empty());
    assert_eq!(engine.stats().total_endpoints, 0);
}
