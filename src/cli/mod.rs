// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the affinity command-line interface.
//!
//! Three subcommands: `related` to rank the items most related to a target
//! from a JSON Lines catalog, `boost` to apply the popularity/recency boost to
//! a single score, and `rerank` to boost and re-order a file of search hits.

pub mod display;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "affinity",
    about = "Related-item ranking and search re-ranking",
    version
)]
pub struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the items most related to a target
    Related {
        /// Target item as owner/name
        target: String,

        /// JSON Lines file with one item record per line
        #[arg(short, long)]
        items: String,

        /// Number of results to return (1-20)
        ///
        /// Defaults to the configured maxResults (5 unless overridden).
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=20))]
        limit: Option<u8>,

        /// JSON config file (weights, threshold, batch sizes)
        #[arg(short, long)]
        config: Option<String>,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Boost one relevance score by popularity and recency
    Boost {
        /// Base relevance score in [0, 1]
        #[arg(long)]
        score: f64,

        /// Star count
        #[arg(long, default_value = "0")]
        stars: u64,

        /// Last update time (RFC 3339)
        #[arg(long)]
        updated_at: DateTime<Utc>,

        /// Reference time (RFC 3339), defaults to the current time
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },

    /// Boost, normalize and re-order a JSON array of search hits
    Rerank {
        /// JSON file containing an array of hits
        #[arg(long)]
        hits: String,

        /// Drop hits whose boosted score falls below this
        #[arg(long)]
        min_score: Option<f64>,

        /// Keep at most this many hits (0 keeps all)
        #[arg(short, long)]
        limit: Option<usize>,

        /// JSON config file (rerank section)
        #[arg(short, long)]
        config: Option<String>,

        /// Reference time (RFC 3339), defaults to the current time
        #[arg(long)]
        now: Option<DateTime<Utc>>,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
