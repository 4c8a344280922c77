// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy.
//!
//! Two failures matter to callers: the builder rejecting a description
//! ([`SchemaFormatError`]) and the search side refusing an index file
//! ([`IndexUnavailableError`]). Both name the thing that is wrong and point
//! at the fix. Duplicate endpoints are not errors at all; they travel as
//! [`DuplicateEndpointWarning`] values in the build report.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The raw API description is structurally invalid. Fatal to the build,
/// harmless to any previously published index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("SchemaFormatError: {location}: {reason}")]
pub struct SchemaFormatError {
    /// Where in the document, e.g. `paths."/v1/services".post.tags[1]`.
    pub location: String,
    pub reason: String,
}

impl SchemaFormatError {
    pub fn new(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

/// The persisted index cannot be used. The only remedy is a rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("IndexUnavailableError: {}: {reason} (run `apidex rebuild` to regenerate it)", .path.display())]
pub struct IndexUnavailableError {
    pub path: PathBuf,
    pub reason: String,
}

impl IndexUnavailableError {
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// A (method, path) pair was declared more than once; the later one won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateEndpointWarning {
    pub id: String,
    /// Location of the declaration that replaced the earlier one.
    pub location: String,
}

impl fmt::Display for DuplicateEndpointWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DuplicateEndpointWarning: {} redeclared at {}; keeping the later declaration",
            self.id, self.location
        )
    }
}

/// Crate-level error. Each variant maps to its own process exit status.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    SchemaFormat(#[from] SchemaFormatError),

    #[error(transparent)]
    IndexUnavailable(#[from] IndexUnavailableError),

    #[error("SchemaUnavailableError: {}: {reason} (run `apidex fetch <SOURCE>` first)", .path.display())]
    SchemaUnavailable { path: PathBuf, reason: String },

    #[error("FetchError: {0}")]
    Fetch(String),

    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit status for this error kind. 2 is left to clap for usage
    /// errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Io(_) => 1,
            Error::IndexUnavailable(_) => 3,
            Error::SchemaFormat(_) => 4,
            Error::SchemaUnavailable { .. } => 5,
            Error::Fetch(_) => 6,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
