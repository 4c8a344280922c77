// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query handling.
//!
//! Throws arbitrary query text and categories at a fixed index and checks
//! the ranking contract on whatever comes back.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

use apidex::{Limit, Query, SearchEngine};

const DESCRIPTION: &str = r#"{
    "info": {"title": "Fuzz", "version": "1"},
    "paths": {
        "/v1/postgres": {"get": {"summary": "List Postgres databases", "tags": ["Postgres"]}},
        "/v1/postgres/{postgresId}": {"delete": {"summary": "Delete a Postgres database", "tags": ["Postgres"]}},
        "/v1/services": {"post": {"summary": "Create a service", "tags": ["Services"]}},
        "/v1/services/{serviceId}/deploys": {"get": {"summary": "List deploys", "tags": ["Deploys", "Services"]}},
        "/v1/key-value": {"get": {"summary": "List Key Value instances", "tags": ["Key Value"], "deprecated": true}},
        "/v1/café": {"get": {"summary": "Ünïcödé résumé", "tags": ["Ünïcödé"]}}
    }
}"#;

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    category: Option<String>,
    limit: Option<u8>,
    hide_deprecated: bool,
}

fuzz_target!(|input: Input| {
    static ENGINE: OnceLock<SearchEngine> = OnceLock::new();
    let engine = ENGINE.get_or_init(|| {
        let built = apidex::build_index(DESCRIPTION.as_bytes(), None, chrono::Utc::now())
            .expect("fixed description builds");
        SearchEngine::new(built.index)
    });

    let limit = match input.limit {
        Some(n) => Limit::Top(n as usize),
        None => Limit::Unlimited,
    };
    let mut query = Query::new(input.text).limit(limit).hide_deprecated(input.hide_deprecated);
    query.category = input.category;

    let results = engine.search(&query);

    assert!(results.hits.len() <= results.total_matches);
    if let Limit::Top(n) = limit {
        assert!(results.hits.len() <= n);
    }
    for pair in results.hits.windows(2) {
        assert!(pair[0].score >= pair[1].score, "scores must be non-increasing");
    }
    for hit in &results.hits {
        assert!(hit.score > 0);
        if let Some(category) = &query.category {
            assert!(hit.record.has_tag(category));
        }
        if query.hide_deprecated {
            assert!(!hit.record.deprecated);
        }
    }
});
