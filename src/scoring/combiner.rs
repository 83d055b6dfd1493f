// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Weighted combination of signal scores with renormalization.
//!
//! The weight table is nominal: it says how much each signal matters when all
//! four are present. When some are missing, the remaining weights are scaled
//! up to sum to 1, so the total stays a convex combination in `[0, 1]`.
//!
//! ```text
//! effective_i = w_i / Σ w_j   (j over available signals)
//! total       = Σ effective_i · score_i
//! ```
//!
//! Without this, an item with no embedding could never score above 0.8, and
//! "no data" would quietly read as "dissimilar".
//!
//! # Default weights
//!
//! | Signal       | Weight |
//! |--------------|--------|
//! | Organization | 0.30   |
//! | Topics       | 0.25   |
//! | Contributors | 0.25   |
//! | Vector       | 0.20   |

use serde::{Deserialize, Serialize};

use crate::contracts::{check_effective_weights_normalized, check_score_in_unit_range};
use crate::error::{Error, Result};
use crate::signals::{Signal, SignalResult};

/// Nominal weight of the organization signal.
pub const ORGANIZATION_WEIGHT: f64 = 0.30;

/// Nominal weight of the topic overlap signal.
pub const TOPICS_WEIGHT: f64 = 0.25;

/// Nominal weight of the shared contributors signal.
pub const CONTRIBUTORS_WEIGHT: f64 = 0.25;

/// Nominal weight of the vector similarity signal.
pub const VECTOR_WEIGHT: f64 = 0.20;

/// Immutable per-signal weights.
///
/// Passed by value into a [`WeightedCombiner`]. Two engines with different
/// tables never see each other's weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeightTable {
    pub organization: f64,
    pub topics: f64,
    pub contributors: f64,
    pub vector: f64,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            organization: ORGANIZATION_WEIGHT,
            topics: TOPICS_WEIGHT,
            contributors: CONTRIBUTORS_WEIGHT,
            vector: VECTOR_WEIGHT,
        }
    }
}

impl WeightTable {
    pub fn new(organization: f64, topics: f64, contributors: f64, vector: f64) -> Result<Self> {
        let table = Self {
            organization,
            topics,
            contributors,
            vector,
        };
        table.validate()?;
        Ok(table)
    }

    /// Weights must be finite, non-negative, and not all zero.
    pub fn validate(&self) -> Result<()> {
        for signal in Signal::ALL {
            let weight = self.weight(signal);
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::Config(format!(
                    "weight for {} must be a finite non-negative number, got {}",
                    signal.name(),
                    weight
                )));
            }
        }
        if self.sum() <= 0.0 {
            return Err(Error::Config("weights must not all be zero".to_string()));
        }
        Ok(())
    }

    pub fn weight(&self, signal: Signal) -> f64 {
        match signal {
            Signal::Organization => self.organization,
            Signal::Topics => self.topics,
            Signal::Contributors => self.contributors,
            Signal::Vector => self.vector,
        }
    }

    pub fn sum(&self) -> f64 {
        Signal::ALL.iter().map(|&s| self.weight(s)).sum()
    }
}

/// How much one signal added to the total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub signal: Signal,
    /// Raw signal score in `[0, 1]`.
    pub score: f64,
    /// Renormalized weight.
    pub weight: f64,
    /// `weight * score`
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedScore {
    pub total: f64,
    /// Only the signals that were available, in signal order.
    pub contributions: Vec<Contribution>,
}

impl CombinedScore {
    fn empty() -> Self {
        Self {
            total: 0.0,
            contributions: Vec::new(),
        }
    }

    /// No signal produced a value: the candidate never enters the top-K.
    pub fn is_excluded(&self) -> bool {
        self.contributions.is_empty()
    }

    pub fn contribution(&self, signal: Signal) -> Option<&Contribution> {
        self.contributions.iter().find(|c| c.signal == signal)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedCombiner {
    weights: WeightTable,
}

impl WeightedCombiner {
    pub fn new(weights: WeightTable) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Combine whatever signals produced a value.
    ///
    /// Unavailable signals drop out and their weight is redistributed. Signals
    /// with a zero table weight are treated as switched off. Nothing left ->
    /// total 0 and [`CombinedScore::is_excluded`].
    pub fn combine(&self, results: &[SignalResult]) -> CombinedScore {
        let available: Vec<(Signal, f64, f64)> = results
            .iter()
            .filter_map(|r| r.score().map(|score| (r.signal, score, self.weights.weight(r.signal))))
            .filter(|&(_, _, weight)| weight > 0.0)
            .collect();

        let total_weight: f64 = available.iter().map(|&(_, _, w)| w).sum();
        if available.is_empty() || total_weight <= 0.0 {
            return CombinedScore::empty();
        }

        let contributions: Vec<Contribution> = available
            .into_iter()
            .map(|(signal, score, weight)| {
                let effective = weight / total_weight;
                Contribution {
                    signal,
                    score,
                    weight: effective,
                    contribution: effective * score,
                }
            })
            .collect();

        check_effective_weights_normalized(contributions.iter().map(|c| c.weight));

        let total = contributions
            .iter()
            .map(|c| c.contribution)
            .sum::<f64>()
            .clamp(0.0, 1.0);
        check_score_in_unit_range(total);

        CombinedScore {
            total,
            contributions,
        }
    }
}
