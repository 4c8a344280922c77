// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search engine over a loaded [`SearchIndex`].
//!
//! The engine owns one immutable index, passed in explicitly; there is no
//! global state. Construction precomputes each record's per-field tokens so
//! queries only do set lookups.
//!
//! # Query contract
//!
//! 1. Tokenize the query with the builder's rule. No tokens → no results.
//! 2. Candidates: records listed under any query token (logical OR).
//! 3. Score each candidate with the field weights from `scoring`.
//! 4. Post-filter by category (case-insensitive exact tag match).
//! 5. Order by score, highest first; ties keep record order.
//! 6. Truncate to the limit.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use crate::error::IndexUnavailableError;
use crate::scoring::score;
use crate::storage::load_index;
use crate::tokenize::{query_tokens, FieldTokens};
use crate::types::{EndpointRecord, IndexMetadata, IndexStats, SearchIndex};

/// Default number of results returned by a query.
pub const DEFAULT_LIMIT: usize = 10;

/// How many ranked results to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Top(usize),
    Unlimited,
}

impl Default for Limit {
    fn default() -> Self {
        Limit::Top(DEFAULT_LIMIT)
    }
}

/// A full query description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub category: Option<String>,
    pub limit: Limit,
    /// Drop deprecated endpoints from the results.
    pub hide_deprecated: bool,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn limit(mut self, limit: Limit) -> Self {
        self.limit = limit;
        self
    }

    pub fn hide_deprecated(mut self, hide: bool) -> Self {
        self.hide_deprecated = hide;
        self
    }
}

/// One ranked result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub record: &'a EndpointRecord,
    pub score: u32,
}

/// Ranked results plus the match count before truncation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults<'a> {
    pub hits: Vec<SearchHit<'a>>,
    pub total_matches: usize,
}

impl<'a> SearchResults<'a> {
    pub fn records(&self) -> Vec<&'a EndpointRecord> {
        self.hits.iter().map(|hit| hit.record).collect()
    }

    /// Matches that were cut off by the limit.
    pub fn truncated(&self) -> usize {
        self.total_matches - self.hits.len()
    }
}

/// Read-only search over one loaded index.
#[derive(Debug)]
pub struct SearchEngine {
    index: SearchIndex,
    fields: Vec<FieldTokens>,
    positions: HashMap<String, usize>,
}

impl SearchEngine {
    /// Wrap an index that has already been validated.
    pub fn new(index: SearchIndex) -> Self {
        let fields = index.records.iter().map(FieldTokens::of).collect();
        let positions = index
            .records
            .iter()
            .enumerate()
            .map(|(pos, record)| (record.id.clone(), pos))
            .collect();
        Self {
            index,
            fields,
            positions,
        }
    }

    /// Load and validate an index file.
    pub fn open(path: &Path) -> Result<Self, IndexUnavailableError> {
        load_index(path).map(Self::new)
    }

    pub fn metadata(&self) -> &IndexMetadata {
        &self.index.metadata
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Ranked keyword search.
    pub fn search(&self, query: &Query) -> SearchResults<'_> {
        let tokens = query_tokens(&query.text);
        if tokens.is_empty() {
            return SearchResults {
                hits: Vec::new(),
                total_matches: 0,
            };
        }

        // Position-keyed so candidates come out in record order.
        let mut candidates: BTreeSet<usize> = BTreeSet::new();
        for token in &tokens {
            let Some(ids) = self.index.token_index.get(token) else {
                continue;
            };
            for id in ids {
                if let Some(&pos) = self.positions.get(id) {
                    candidates.insert(pos);
                }
            }
        }

        let mut hits: Vec<SearchHit<'_>> = candidates
            .into_iter()
            .map(|pos| (&self.index.records[pos], score(&self.fields[pos], &tokens)))
            .filter(|(_, score)| *score > 0)
            .filter(|(record, _)| query.category.as_deref().is_none_or(|c| record.has_tag(c)))
            .filter(|(record, _)| !(query.hide_deprecated && record.deprecated))
            .map(|(record, score)| SearchHit { record, score })
            .collect();

        // Stable: equal scores keep record order.
        hits.sort_by_key(|hit| Reverse(hit.score));

        let total_matches = hits.len();
        if let Limit::Top(n) = query.limit {
            hits.truncate(n);
        }
        SearchResults {
            hits,
            total_matches,
        }
    }

    /// `query(text, category?, limit?)`: the ranked records only.
    pub fn query(&self, text: &str, category: Option<&str>, limit: Limit) -> Vec<&EndpointRecord> {
        let mut query = Query::new(text).limit(limit);
        query.category = category.map(str::to_string);
        self.search(&query).records()
    }

    /// Every record in enumeration order, optionally restricted to a tag.
    pub fn list_all(&self, category: Option<&str>) -> Vec<&EndpointRecord> {
        self.index
            .records
            .iter()
            .filter(|record| category.is_none_or(|c| record.has_tag(c)))
            .collect()
    }

    /// Aggregate counts over the loaded index.
    pub fn stats(&self) -> IndexStats {
        let records = &self.index.records;
        let mut tag_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut method_counts = BTreeMap::new();
        for record in records {
            for tag in &record.tags {
                *tag_counts.entry(tag.clone()).or_default() += 1;
            }
            *method_counts.entry(record.method).or_default() += 1;
        }

        let meta = &self.index.metadata;
        IndexStats {
            total_endpoints: records.len(),
            tag_counts,
            untagged: records.iter().filter(|r| r.tags.is_empty()).count(),
            method_counts,
            auth_required: records.iter().filter(|r| r.requires_auth).count(),
            deprecated: records.iter().filter(|r| r.deprecated).count(),
            built_at: meta.built_at,
            source_version: meta.source_version.clone(),
            title: meta.title.clone(),
        }
    }
}
