// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The four signal computers.
//!
//! | Signal         | Formula                         | Unavailable when            |
//! |----------------|---------------------------------|-----------------------------|
//! | `Organization` | owner keys equal -> 1, else 0   | never                       |
//! | `Topics`       | Jaccard `|A∩B| / |A∪B|`         | both topic sets empty       |
//! | `Contributors` | `|A∩B| / min(|A|, |B|)`         | either list empty           |
//! | `Vector`       | cosine, negatives clamped to 0  | either embedding missing    |
//!
//! Every available value lies in `[0, 1]`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{ItemView, ScoreComponents, MAX_TOP_CONTRIBUTORS};

/// Which similarity measurement a score came from.
///
/// Declaration order doubles as the tiebreak order for explanations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Signal {
    Organization,
    Topics,
    Contributors,
    Vector,
}

impl Signal {
    pub const ALL: [Signal; 4] = [
        Signal::Organization,
        Signal::Topics,
        Signal::Contributors,
        Signal::Vector,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Signal::Organization => "organization",
            Signal::Topics => "topics",
            Signal::Contributors => "contributors",
            Signal::Vector => "vector",
        }
    }
}

/// A signal's verdict: a score, or "no data to compare".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignalValue {
    Available(f64),
    Unavailable,
}

impl SignalValue {
    pub fn score(self) -> Option<f64> {
        match self {
            SignalValue::Available(score) => Some(score),
            SignalValue::Unavailable => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    pub signal: Signal,
    pub value: SignalValue,
}

impl SignalResult {
    pub fn available(signal: Signal, score: f64) -> Self {
        Self {
            signal,
            value: SignalValue::Available(score),
        }
    }

    pub fn unavailable(signal: Signal) -> Self {
        Self {
            signal,
            value: SignalValue::Unavailable,
        }
    }

    pub fn score(&self) -> Option<f64> {
        self.value.score()
    }

    pub fn is_available(&self) -> bool {
        self.score().is_some()
    }
}

/// 1.0 when both items live under the same owner, 0.0 otherwise.
///
/// Owner keys are normalized when the view is built, so this is a plain
/// equality check. Always available.
pub fn organization_match(target: &ItemView, candidate: &ItemView) -> SignalResult {
    let same = !target.owner_key.is_empty()
        && target.owner_key.eq_ignore_ascii_case(&candidate.owner_key);
    SignalResult::available(Signal::Organization, if same { 1.0 } else { 0.0 })
}

/// Jaccard similarity of the topic sets.
///
/// Empty vs. empty carries no information and is `Unavailable`. Exactly one
/// empty side is a real `0.0`: one item is tagged and the other shares none
/// of those tags.
pub fn topic_overlap(target: &ItemView, candidate: &ItemView) -> SignalResult {
    if target.topics.is_empty() && candidate.topics.is_empty() {
        return SignalResult::unavailable(Signal::Topics);
    }

    let a: BTreeSet<&str> = target.topics.iter().map(String::as_str).collect();
    let b: BTreeSet<&str> = candidate.topics.iter().map(String::as_str).collect();
    let intersection = a.intersection(&b).count();
    let union = a.len() + b.len() - intersection;
    SignalResult::available(Signal::Topics, intersection as f64 / union as f64)
}

/// Shared top contributors, normalized by the smaller list.
///
/// Lists are capped at [`MAX_TOP_CONTRIBUTORS`] before comparison. Either list
/// empty -> `Unavailable`.
pub fn shared_contributors(target: &ItemView, candidate: &ItemView) -> SignalResult {
    let a: BTreeSet<&str> = top_logins(target);
    let b: BTreeSet<&str> = top_logins(candidate);
    if a.is_empty() || b.is_empty() {
        return SignalResult::unavailable(Signal::Contributors);
    }

    let intersection = a.intersection(&b).count();
    let min_size = a.len().min(b.len());
    SignalResult::available(
        Signal::Contributors,
        intersection as f64 / min_size as f64,
    )
}

fn top_logins(item: &ItemView) -> BTreeSet<&str> {
    item.top_contributors
        .iter()
        .take(MAX_TOP_CONTRIBUTORS)
        .map(String::as_str)
        .collect()
}

/// Cosine similarity of the two embeddings, negatives clamped to zero.
///
/// Dissimilar vectors mean "no relation", not "negative relation", so the
/// floor is 0. A zero-norm vector has no direction and scores 0.
///
/// # Errors
///
/// `Error::DimensionMismatch` when both embeddings exist with different
/// lengths. That is a caller bug (mixed embedding models), not missing data.
/// `Error::InvalidEmbedding` when either side holds a NaN or infinite value.
pub fn vector_similarity(target: &ItemView, candidate: &ItemView) -> Result<SignalResult> {
    let (a, b) = match (&target.embedding, &candidate.embedding) {
        (Some(a), Some(b)) => (a, b),
        _ => return Ok(SignalResult::unavailable(Signal::Vector)),
    };

    for item in [target, candidate] {
        if let Some(index) = item.non_finite_embedding_index() {
            return Err(Error::InvalidEmbedding {
                id: item.id.to_string(),
                index,
            });
        }
    }

    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let cosine = cosine_similarity(a, b);
    Ok(SignalResult::available(Signal::Vector, cosine.clamp(0.0, 1.0)))
}

/// Raw cosine in `[-1, 1]`, accumulated in f64. Zero for empty or zero-norm input.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Run all four signals for one (target, candidate) pair, in [`Signal::ALL`] order.
pub fn compute_signals(target: &ItemView, candidate: &ItemView) -> Result<[SignalResult; 4]> {
    Ok([
        organization_match(target, candidate),
        topic_overlap(target, candidate),
        shared_contributors(target, candidate),
        vector_similarity(target, candidate)?,
    ])
}

impl From<&[SignalResult]> for ScoreComponents {
    fn from(results: &[SignalResult]) -> Self {
        let mut components = ScoreComponents::default();
        for result in results {
            let slot = match result.signal {
                Signal::Organization => &mut components.organization,
                Signal::Topics => &mut components.topics,
                Signal::Contributors => &mut components.contributors,
                Signal::Vector => &mut components.vector,
            };
            *slot = result.score();
        }
        components
    }
}
