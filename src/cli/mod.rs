// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the apidex command-line interface.
//!
//! `fetch` stores a description, `rebuild` turns it into an index, and
//! `search`, `list-endpoints` and `stats` read the index. Only the index is
//! ever loaded by the read commands, never the full description.

pub mod display;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use apidex::config::{DataPaths, DEFAULT_DATA_DIR};
use apidex::search::DEFAULT_LIMIT;

#[derive(Parser)]
#[command(
    name = "apidex",
    about = "Search a local index of API endpoints without loading the full description",
    version
)]
pub struct Cli {
    /// Directory holding the raw description, its metadata and the index
    #[arg(long, global = true, env = "APIDEX_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Index file to read or write (defaults to <DATA_DIR>/endpoints-index.json)
    #[arg(long, global = true)]
    pub index: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn paths(&self) -> DataPaths {
        let paths = DataPaths::in_dir(&self.data_dir);
        match &self.index {
            Some(index) => paths.with_index(index),
            None => paths,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search endpoints by keyword, most relevant first
    Search {
        /// Search terms (matched against paths, tags and summaries)
        query: String,

        /// Only endpoints carrying this tag (case-insensitive)
        #[arg(short, long, visible_alias = "tag")]
        category: Option<String>,

        /// Maximum number of results to show
        #[arg(short = 'n', long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Show all results (no limit)
        #[arg(short, long, conflicts_with = "limit")]
        all: bool,

        /// Leave out deprecated endpoints
        #[arg(long)]
        hide_deprecated: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every endpoint in document order
    ListEndpoints {
        /// Only endpoints carrying this tag (case-insensitive)
        #[arg(short, long, visible_alias = "tag")]
        category: Option<String>,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show endpoint counts by method and tag
    Stats {
        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rebuild the index from the stored description
    Rebuild,

    /// Store a description from a URL or file, then rebuild
    Fetch {
        /// http(s) URL or local path of the JSON description
        source: String,

        /// Store the description without rebuilding the index
        #[arg(long)]
        no_rebuild: bool,
    },
}
