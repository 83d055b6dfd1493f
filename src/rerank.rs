// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Re-rank full-text search hits by popularity and recency.
//!
//! Base relevance comes from an upstream search step. Each hit is boosted,
//! filtered, max-normalized so the best hit scores 1.0, then sorted and
//! numbered from 1.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contracts::check_sorted_descending;
use crate::error::{Error, Result};
use crate::scoring::ranking::compare_hits;
use crate::scoring::{boost, validate_boost_input};
use crate::types::ItemId;

/// One hit from the upstream search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: ItemId,
    pub base_score: f64,
    #[serde(default)]
    pub stars: u64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedHit {
    pub id: ItemId,
    /// Boosted, then max-normalized score.
    pub score: f64,
    pub stars: u64,
    /// 1-based position.
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RerankOptions {
    /// Boosted scores below this are dropped before normalization.
    pub min_score: f64,
    /// 0 keeps everything.
    pub limit: usize,
}

impl Default for RerankOptions {
    fn default() -> Self {
        Self {
            min_score: 0.0,
            limit: 0,
        }
    }
}

impl RerankOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.min_score.is_finite() || !(0.0..=1.0).contains(&self.min_score) {
            return Err(Error::Config(format!(
                "rerank minScore must be within [0, 1], got {}",
                self.min_score
            )));
        }
        Ok(())
    }
}

pub fn rerank(hits: Vec<SearchHit>, options: &RerankOptions, now: DateTime<Utc>) -> Result<Vec<RankedHit>> {
    options.validate()?;

    let mut ranked = Vec::with_capacity(hits.len());
    for hit in hits {
        validate_boost_input(hit.id.as_str(), hit.base_score, hit.updated_at, now)?;
        let score = boost(hit.base_score, hit.stars, hit.updated_at, now);
        if score < options.min_score {
            continue;
        }
        ranked.push(RankedHit {
            id: hit.id,
            score,
            stars: hit.stars,
            rank: 0,
        });
    }

    normalize_scores(&mut ranked);
    ranked.sort_by(compare_hits);
    check_sorted_descending(ranked.iter().map(|h| h.score));

    if options.limit > 0 {
        ranked.truncate(options.limit);
    }
    for (i, hit) in ranked.iter_mut().enumerate() {
        hit.rank = i + 1;
    }
    Ok(ranked)
}

/// Divide by the maximum so the best hit lands on 1.0. All-zero stays zero.
fn normalize_scores(hits: &mut [RankedHit]) {
    let max = hits.iter().map(|h| h.score).fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return;
    }
    for hit in hits {
        hit.score = (hit.score / max).clamp(0.0, 1.0);
    }
}
