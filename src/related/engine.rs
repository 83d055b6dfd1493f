// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The relatedness engine: batch scan, top-K selection, threshold, explain.
//!
//! # Flow
//!
//! 1. Validate the target and the options.
//! 2. Pull one batch from the source (after checking cancellation).
//! 3. Score every candidate in the batch. With the `parallel` feature the
//!    scoring fans out over rayon, but results are collected in batch order
//!    and offered to the top-K one by one, so the outcome is identical to a
//!    sequential run.
//! 4. Repeat until the source is exhausted.
//! 5. Drain the top-K, drop anything under `min_score`, keep `max_results`.
//!
//! A source failure or cancellation aborts the whole call. Partial results
//! are never returned.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::explain::build_explanation;
use super::source::CandidateSource;
use crate::cancel::CancellationToken;
use crate::error::{Error, Result};
use crate::scoring::{CombinedScore, WeightTable, WeightedCombiner};
use crate::signals::{compute_signals, SignalResult};
use crate::topk::BoundedTopK;
use crate::types::{ItemId, ItemView, RankedResult, ScoreComponents};

/// Candidates pulled from the source per round trip.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Best-so-far entries held across the whole scan.
pub const DEFAULT_TOP_K_CAPACITY: usize = 100;

/// Totals below this never reach the output.
pub const DEFAULT_MIN_SCORE: f64 = 0.25;

/// Output length.
pub const DEFAULT_MAX_RESULTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelatedOptions {
    pub batch_size: usize,
    pub top_k_capacity: usize,
    pub min_score: f64,
    pub max_results: usize,
    pub weights: WeightTable,
}

impl Default for RelatedOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            top_k_capacity: DEFAULT_TOP_K_CAPACITY,
            min_score: DEFAULT_MIN_SCORE,
            max_results: DEFAULT_MAX_RESULTS,
            weights: WeightTable::default(),
        }
    }
}

impl RelatedOptions {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batchSize must be at least 1".to_string()));
        }
        if self.max_results == 0 {
            return Err(Error::Config("maxResults must be at least 1".to_string()));
        }
        if self.top_k_capacity < self.max_results {
            return Err(Error::Config(format!(
                "topKCapacity ({}) must be at least maxResults ({})",
                self.top_k_capacity, self.max_results
            )));
        }
        if !self.min_score.is_finite() || !(0.0..=1.0).contains(&self.min_score) {
            return Err(Error::Config(format!(
                "minScore must be within [0, 1], got {}",
                self.min_score
            )));
        }
        self.weights.validate()
    }
}

/// Everything computed for one (target, candidate) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    pub signals: [SignalResult; 4],
    pub combined: CombinedScore,
}

impl CandidateScore {
    pub fn total(&self) -> f64 {
        self.combined.total
    }
}

/// What the top-K holds per candidate until the final drain.
struct Held {
    candidate: ItemView,
    score: CandidateScore,
}

/// Finds the items most related to a target.
///
/// Holds only immutable options, so one engine can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct RelatednessEngine {
    options: RelatedOptions,
    combiner: WeightedCombiner,
}

impl Default for RelatednessEngine {
    fn default() -> Self {
        Self {
            combiner: WeightedCombiner::new(WeightTable::default()),
            options: RelatedOptions::default(),
        }
    }
}

impl RelatednessEngine {
    pub fn new(options: RelatedOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            combiner: WeightedCombiner::new(options.weights),
            options,
        })
    }

    pub fn options(&self) -> &RelatedOptions {
        &self.options
    }

    /// Score a single pair without touching any source.
    pub fn score_candidate(&self, target: &ItemView, candidate: &ItemView) -> Result<CandidateScore> {
        let signals = compute_signals(target, candidate)?;
        let combined = self.combiner.combine(&signals);
        Ok(CandidateScore { signals, combined })
    }

    /// Rank the source's candidates by relatedness to `target`.
    ///
    /// Returns at most `max_results` entries, best first, each scoring at
    /// least `min_score`. Equal scores keep the order the source produced
    /// them in.
    pub fn find_related<S: CandidateSource + ?Sized>(
        &self,
        target: &ItemView,
        source: &mut S,
        cancel: &CancellationToken,
    ) -> Result<Vec<RankedResult>> {
        validate_target(target)?;

        let span = info_span!(
            "find_related",
            item = %target.full_name,
            batch_size = self.options.batch_size,
            capacity = self.options.top_k_capacity,
        );
        let _guard = span.enter();

        let mut top: BoundedTopK<ItemId, Held> = BoundedTopK::new(self.options.top_k_capacity)?;
        let mut batch_index = 0usize;
        let mut scanned = 0usize;
        let mut scored = 0usize;

        loop {
            if cancel.is_cancelled() {
                warn!(batch = batch_index, "related search cancelled");
                return Err(Error::Cancelled { batch: batch_index });
            }

            let batch = match source.next_batch(self.options.batch_size) {
                Ok(Some(batch)) if !batch.is_empty() => batch,
                Ok(_) => break,
                Err(source) => {
                    warn!(batch = batch_index, error = %source, "candidate source failed");
                    return Err(Error::Source {
                        batch: batch_index,
                        source,
                    });
                }
            };

            let candidates = batch.len();
            scanned += candidates;

            for (candidate, score) in self.score_batch(target, batch)? {
                scored += 1;
                top.offer(candidate.id.clone(), score.total(), Held { candidate, score });
            }

            debug!(batch = batch_index, candidates, held = top.len(), "scored batch");
            batch_index += 1;
        }

        let results: Vec<RankedResult> = top
            .drain()
            .into_iter()
            .filter(|entry| entry.score >= self.options.min_score)
            .take(self.options.max_results)
            .map(|entry| to_result(target, entry.item))
            .collect();

        info!(scanned, scored, returned = results.len(), "related search complete");
        Ok(results)
    }

    /// Score one batch, keeping batch order. Drops the target itself and any
    /// candidate with no available signal.
    fn score_batch(&self, target: &ItemView, batch: Vec<ItemView>) -> Result<Vec<(ItemView, CandidateScore)>> {
        #[cfg(feature = "parallel")]
        let outcomes: Vec<Result<Option<(ItemView, CandidateScore)>>> = batch
            .into_par_iter()
            .map(|candidate| self.score_one(target, candidate))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<Result<Option<(ItemView, CandidateScore)>>> = batch
            .into_iter()
            .map(|candidate| self.score_one(target, candidate))
            .collect();

        // First error in batch order wins, regardless of which thread hit it.
        let mut kept = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            if let Some(pair) = outcome? {
                kept.push(pair);
            }
        }
        Ok(kept)
    }

    fn score_one(&self, target: &ItemView, candidate: ItemView) -> Result<Option<(ItemView, CandidateScore)>> {
        if candidate.id == target.id {
            return Ok(None);
        }
        let score = self.score_candidate(target, &candidate)?;
        if score.combined.is_excluded() {
            return Ok(None);
        }
        Ok(Some((candidate, score)))
    }
}

fn validate_target(target: &ItemView) -> Result<()> {
    if target.id.as_str().trim().is_empty() {
        return Err(Error::InvalidTarget("target has an empty id".to_string()));
    }
    if target.owner_key.is_empty() {
        return Err(Error::InvalidTarget(format!(
            "cannot derive an owner from '{}'",
            target.full_name
        )));
    }
    Ok(())
}

fn to_result(target: &ItemView, held: Held) -> RankedResult {
    let Held { candidate, score } = held;
    RankedResult {
        explanation: build_explanation(target, &candidate, &score.combined),
        components: ScoreComponents::from(&score.signals[..]),
        score: score.combined.total,
        id: candidate.id,
        full_name: candidate.full_name,
    }
}
