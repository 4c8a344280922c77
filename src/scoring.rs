// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind endpoint ranking.
//!
//! A record's score is the sum, over distinct query tokens it contains, of
//! the weights of the fields the token was found in. Paths dominate because
//! people search for resources ("postgres", "deploys") far more than for
//! prose, tags come next, summaries last.
//!
//! # Key Invariant: Field Ordering
//!
//! ```text
//! PATH_WEIGHT > TAG_WEIGHT > SUMMARY_WEIGHT > 0
//! ```
//!
//! So for a single-token query, a path-only match strictly outranks a
//! summary-only match. A token present in several fields earns the sum.

use crate::tokenize::FieldTokens;

/// Weight of a token found among the path segments.
pub const PATH_WEIGHT: u32 = 3;

/// Weight of a token found among the tags.
pub const TAG_WEIGHT: u32 = 2;

/// Weight of a token found among the summary words.
pub const SUMMARY_WEIGHT: u32 = 1;

/// Weight one token earns against one record.
pub fn token_weight(fields: &FieldTokens, token: &str) -> u32 {
    let mut weight = 0;
    if fields.path.contains(token) {
        weight += PATH_WEIGHT;
    }
    if fields.tags.contains(token) {
        weight += TAG_WEIGHT;
    }
    if fields.summary.contains(token) {
        weight += SUMMARY_WEIGHT;
    }
    weight
}

/// Score of a record for a de-duplicated token list. Zero means no match.
pub fn score(fields: &FieldTokens, tokens: &[String]) -> u32 {
    tokens.iter().map(|t| token_weight(fields, t)).sum()
}
