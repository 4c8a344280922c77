// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Token index construction and validation.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **IDS_IN_RECORD_ORDER**: each id list follows the order of `records`
//! 2. **NO_DUPLICATE_IDS**: an id appears at most once per token
//! 3. **NON_EMPTY**: every stored token has at least one id
//! 4. **IDS_RESOLVE**: every id names a record in the same index
//! 5. **DERIVED**: the whole map equals `build_token_index(records)`; a token
//!    missing from the map would make its records unreachable

use std::collections::{BTreeMap, HashSet};

use crate::tokenize::FieldTokens;
use crate::types::EndpointRecord;

/// Token → ids of the records whose path, summary or tags contain it.
///
/// Records are visited in order, so every list comes out in record order
/// without a sort, and a `BTreeMap` keeps the token order stable on disk.
pub fn build_token_index(records: &[EndpointRecord]) -> BTreeMap<String, Vec<String>> {
    let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for record in records {
        for token in FieldTokens::of(record).all() {
            index
                .entry(token.to_string())
                .or_default()
                .push(record.id.clone());
        }
    }
    index
}

/// Check the invariants above against a loaded record list.
///
/// Returns a description of the first violation.
pub fn validate_token_index(
    index: &BTreeMap<String, Vec<String>>,
    records: &[EndpointRecord],
) -> Result<(), String> {
    let known: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
    for (token, ids) in index {
        if ids.is_empty() {
            return Err(format!("token '{}' has no ids", token));
        }
        let mut seen = HashSet::with_capacity(ids.len());
        for id in ids {
            if !known.contains(id.as_str()) {
                return Err(format!("token '{}' refers to unknown id '{}'", token, id));
            }
            if !seen.insert(id.as_str()) {
                return Err(format!("token '{}' lists id '{}' twice", token, id));
            }
        }
    }

    let expected = build_token_index(records);
    if let Some(token) = expected.keys().find(|token| !index.contains_key(*token)) {
        return Err(format!("token '{}' is missing", token));
    }
    for (token, ids) in index {
        match expected.get(token) {
            None => return Err(format!("token '{}' does not occur in any record", token)),
            Some(derived) if derived != ids => {
                return Err(format!(
                    "token '{}' lists {:?} but the records give {:?}",
                    token, ids, derived
                ))
            }
            Some(_) => {}
        }
    }
    Ok(())
}
