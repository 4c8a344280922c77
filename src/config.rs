// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Where things live on disk.

use std::path::{Path, PathBuf};

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "assets/schema";

/// Raw API description as downloaded.
pub const SCHEMA_FILE: &str = "api-schema.json";

/// `{lastUpdated, source, version}` written next to the description.
pub const SCHEMA_METADATA_FILE: &str = "schema-metadata.json";

/// The published search index.
pub const INDEX_FILE: &str = "endpoints-index.json";

/// Resolved locations of the three files the tool reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub schema: PathBuf,
    pub schema_metadata: PathBuf,
    pub index: PathBuf,
}

impl DataPaths {
    /// Standard layout inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            schema: dir.join(SCHEMA_FILE),
            schema_metadata: dir.join(SCHEMA_METADATA_FILE),
            index: dir.join(INDEX_FILE),
        }
    }

    /// Same layout with the index placed somewhere else.
    pub fn with_index(mut self, index: impl Into<PathBuf>) -> Self {
        self.index = index.into();
        self
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_DATA_DIR)
    }
}
