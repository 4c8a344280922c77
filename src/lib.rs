// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Keyword search over the endpoints of an API description.
//!
//! A machine-readable API description (OpenAPI-style JSON) is flattened into
//! one record per (method, path) pair and published as a small index file.
//! Queries then run against that file alone, so finding the right endpoint
//! never requires loading the full description.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  fetch.rs   │────▶│   build/     │────▶│  storage.rs  │────▶│  search.rs  │
//! │ (raw JSON + │     │ (records,    │     │ (atomic      │     │ (query,     │
//! │  metadata)  │     │  token index)│     │  publish)    │     │  list, stats│
//! └─────────────┘     └──────────────┘     └──────────────┘     └─────────────┘
//!                            │                                         │
//!                            ▼                                         ▼
//!                     ┌─────────────────────────────────────────────────────┐
//!                     │            tokenize.rs  +  scoring.rs               │
//!                     │   (one token rule for both sides, field weights)    │
//!                     └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use apidex::{build_index, Limit, SearchEngine};
//!
//! let built = build_index(raw_json, None, chrono::Utc::now())?;
//! let engine = SearchEngine::new(built.index);
//! let hits = engine.query("postgres", None, Limit::default());
//! ```

pub mod build;
pub mod config;
pub mod error;
pub mod fetch;
mod inverted;
mod scoring;
pub mod search;
pub mod storage;
pub mod tokenize;
mod types;

pub use build::{build_index, rebuild, BuildReport, BuiltIndex};
pub use error::{DuplicateEndpointWarning, Error, IndexUnavailableError, Result, SchemaFormatError};
pub use inverted::build_token_index;
pub use scoring::{score, token_weight, PATH_WEIGHT, SUMMARY_WEIGHT, TAG_WEIGHT};
pub use search::{Limit, Query, SearchEngine, SearchHit, SearchResults, DEFAULT_LIMIT};
pub use storage::{load_index, save_index};
pub use types::{
    endpoint_id, EndpointRecord, HttpMethod, IndexMetadata, IndexStats, SchemaMetadata,
    SearchIndex, INDEX_FORMAT_VERSION,
};
