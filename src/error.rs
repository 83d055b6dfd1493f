// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Errors surfaced by the ranking core.
//!
//! Three families, handled differently:
//!
//! - **Input validation** (`InvalidTarget`, `DimensionMismatch`,
//!   `InvalidEmbedding`, `InvalidScore`, `FutureTimestamp`, `Config`): caller
//!   bugs. Fail fast, never degrade.
//! - **Partial data** (missing embeddings, empty topics): not errors at all.
//!   Those become `SignalValue::Unavailable` and get renormalized away.
//! - **Upstream failure** (`Source`, `Cancelled`): terminal for the whole
//!   `find_related` call. No partial results are returned.
//!
//! A terminal error means "no related items could be computed". An empty
//! `Ok(vec![])` means "nothing cleared the threshold". Keep them distinct.

use thiserror::Error;

/// Failures reported by a candidate source while streaming batches.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read candidates: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid record on line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("{0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid target item: {0}")]
    InvalidTarget(String),

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("embedding of '{id}' has a non-finite component at index {index}")]
    InvalidEmbedding { id: String, index: usize },

    #[error("invalid base score {score} for '{id}' (must be finite and within [0, 1])")]
    InvalidScore { id: String, score: f64 },

    #[error("updated_at for '{id}' is in the future")]
    FutureTimestamp { id: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("candidate source failed at batch {batch}: {source}")]
    Source {
        batch: usize,
        #[source]
        source: SourceError,
    },

    #[error("related search cancelled before batch {batch}")]
    Cancelled { batch: usize },

    #[error("failed to read catalog: {0}")]
    Catalog(#[source] SourceError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for upstream failures that a caller may reasonably retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Source { .. } | Error::Cancelled { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
