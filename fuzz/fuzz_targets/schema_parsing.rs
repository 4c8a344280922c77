// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for description parsing.
//!
//! Arbitrary bytes go through the full builder. Every input must either be
//! rejected with a SchemaFormatError or produce an index that passes the
//! same validation a loader applies.

#![no_main]

use apidex::storage::validate_index;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(built) = apidex::build_index(data, None, chrono::Utc::now()) else {
        return;
    };
    let index = built.index;

    if let Err(reason) = validate_index(&index) {
        panic!("builder produced an invalid index: {}", reason);
    }

    // A freshly built index must survive its own serialization.
    let encoded = serde_json::to_vec(&index).expect("index serializes");
    let decoded: apidex::SearchIndex = serde_json::from_slice(&encoded).expect("index decodes");
    assert_eq!(decoded, index);
});
