// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The token rule shared by the builder and the search engine.
//!
//! Both sides must agree byte for byte, otherwise a record indexed under
//! `services` is unreachable by a query that folds to `Services`. Everything
//! that produces a token goes through [`fold`] and [`words`].
//!
//! - Case folding: lowercase, plus diacritic stripping with the
//!   `unicode-normalization` feature ("café" → "cafe").
//! - Splitting: on every non-alphanumeric character.
//! - Stop tokens: anything shorter than [`MIN_TOKEN_LEN`] characters.

use std::collections::BTreeSet;

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

use crate::types::EndpointRecord;

/// Name of the case folding compiled into this build. Stored in index
/// metadata; an index folded one way cannot be queried the other way.
#[cfg(feature = "unicode-normalization")]
pub const FOLD_MODE: &str = "lowercase+strip-diacritics";

/// Name of the case folding compiled into this build.
#[cfg(not(feature = "unicode-normalization"))]
pub const FOLD_MODE: &str = "lowercase";

/// Tokens shorter than this (in characters) are never indexed or queried.
pub const MIN_TOKEN_LEN: usize = 2;

/// Case-fold a string: NFD, drop combining marks, lowercase.
#[cfg(feature = "unicode-normalization")]
pub fn fold(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Case-fold without unicode tables: lowercase only.
#[cfg(not(feature = "unicode-normalization"))]
pub fn fold(value: &str) -> String {
    value.to_lowercase()
}

/// Combining diacritical marks (Unicode category Mn in the Latin-adjacent blocks).
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

fn long_enough(token: &str) -> bool {
    token.chars().count() >= MIN_TOKEN_LEN
}

/// Fold `text` and split it into words on non-alphanumeric boundaries,
/// dropping stop tokens. Order and repeats are preserved.
pub fn words(text: &str) -> Vec<String> {
    fold(text)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| long_enough(w))
        .map(str::to_string)
        .collect()
}

/// Tokens of a query, de-duplicated, first occurrence order.
///
/// Pure punctuation or single letters yield an empty list.
pub fn query_tokens(text: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    words(text)
        .into_iter()
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

/// Tokens of a URL path template.
///
/// Whole `{param}` segments are dropped, inline placeholders such as
/// `{name}.json` lose the braced part, and what remains is split like any
/// other text.
pub fn path_tokens(path: &str) -> BTreeSet<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .filter(|segment| !(segment.starts_with('{') && segment.ends_with('}')))
        .flat_map(|segment| words(&strip_placeholders(segment)))
        .collect()
}

fn strip_placeholders(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut depth = 0usize;
    for c in segment.chars() {
        match c {
            '{' => depth += 1,
            '}' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Tokens of a summary line.
pub fn summary_tokens(summary: &str) -> BTreeSet<String> {
    words(summary).into_iter().collect()
}

/// Tokens of a tag set: each tag verbatim (folded, trimmed), plus its words
/// when it has more than one.
pub fn tag_tokens(tags: &[String]) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();
    for tag in tags {
        let whole = fold(tag.trim());
        if long_enough(&whole) {
            tokens.insert(whole);
        }
        tokens.extend(words(tag));
    }
    tokens
}

/// A record's tokens, kept per field so matches can be weighted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTokens {
    pub path: BTreeSet<String>,
    pub tags: BTreeSet<String>,
    pub summary: BTreeSet<String>,
}

impl FieldTokens {
    pub fn of(record: &EndpointRecord) -> Self {
        Self {
            path: path_tokens(&record.path),
            tags: tag_tokens(&record.tags),
            summary: summary_tokens(&record.summary),
        }
    }

    /// Union of all fields.
    pub fn all(&self) -> BTreeSet<&str> {
        self.path
            .iter()
            .chain(&self.tags)
            .chain(&self.summary)
            .map(String::as_str)
            .collect()
    }
}
