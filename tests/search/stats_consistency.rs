//! Stats agree with the listing and the metadata.

use crate::common::{data_dir_with_schema, engine_from_fixture, fixture_bytes, RENDER_SAMPLE};
use apidex::{rebuild, HttpMethod, SearchEngine};

#[test]
fn test_totals_agree() {
    let engine = engine_from_fixture(RENDER_SAMPLE);
    let stats = engine.stats();
    assert_eq!(stats.total_endpoints, engine.list_all(None).len());
    assert_eq!(stats.total_endpoints, engine.metadata().record_count);
    assert_eq!(stats.method_counts.values().sum::<usize>(), stats.total_endpoints);
}

#[test]
fn test_fixture_counts() {
    let stats = engine_from_fixture(RENDER_SAMPLE).stats();
    assert_eq!(stats.total_endpoints, 14);
    assert_eq!(stats.tag_counts["Services"], 5);
    assert_eq!(stats.tag_counts["Deploys"], 2);
    assert_eq!(stats.tag_counts["Postgres"], 3);
    assert_eq!(stats.tag_counts["Key Value"], 1);
    assert_eq!(stats.untagged, 1);
    assert_eq!(stats.auth_required, 13);
    assert_eq!(stats.deprecated, 1);
    assert_eq!(stats.method_counts[&HttpMethod::Get], 8);
    assert_eq!(stats.method_counts[&HttpMethod::Post], 4);
    assert_eq!(stats.method_counts[&HttpMethod::Patch], 1);
    assert_eq!(stats.method_counts[&HttpMethod::Delete], 1);
    assert_eq!(stats.title, "Render Public API");
}

#[test]
fn test_stats_survive_publish_and_load() {
    let (_dir, paths) = data_dir_with_schema(&fixture_bytes(RENDER_SAMPLE));
    rebuild(&paths).unwrap();
    let loaded = SearchEngine::open(&paths.index).unwrap();
    let stats = loaded.stats();

    assert_eq!(stats.total_endpoints, loaded.metadata().record_count);
    assert_eq!(stats.built_at, loaded.metadata().built_at);
    assert_eq!(stats.source_version, "1.0.0");

    let in_memory = engine_from_fixture(RENDER_SAMPLE).stats();
    assert_eq!(stats.tag_counts, in_memory.tag_counts);
    assert_eq!(stats.method_counts, in_memory.method_counts);
}

#[test]
fn test_stats_json_uses_camel_case() {
    let json = serde_json::to_value(engine_from_fixture(RENDER_SAMPLE).stats()).unwrap();
    assert_eq!(json["totalEndpoints"], 14);
    assert_eq!(json["tagCounts"]["Postgres"], 3);
    assert_eq!(json["methodCounts"]["GET"], 8);
    assert_eq!(json["authRequired"], 13);
}
