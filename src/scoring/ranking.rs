// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how scored items get sorted.
//!
//! Every ordered output goes through one of these comparators. Sorting by
//! score alone is not enough: two candidates with the same total would come
//! out in whatever order the source or a hash map happened to produce, and
//! the same query could return different top-N lists on different runs.
//!
//! # Relatedness order
//!
//! 1. **Score** - descending
//! 2. **Encounter sequence** - ascending (first seen wins)
//!
//! # Search hit order
//!
//! 1. **Score** - descending
//! 2. **Stars** - descending
//! 3. **Item id** - ascending, for absolute determinism

use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use crate::rerank::RankedHit;

/// Compare two relatedness entries. `Ordering::Less` means `a` ranks higher.
///
/// Scores go through `OrderedFloat`, so the order stays total even if a NaN
/// slips through. Callers keep scores clamped to `[0, 1]`.
pub fn compare_scored(a_score: f64, a_seq: u64, b_score: f64, b_seq: u64) -> Ordering {
    OrderedFloat(b_score)
        .cmp(&OrderedFloat(a_score))
        .then_with(|| a_seq.cmp(&b_seq))
}

/// Compare two boosted search hits. `Ordering::Less` means `a` ranks higher.
pub fn compare_hits(a: &RankedHit, b: &RankedHit) -> Ordering {
    OrderedFloat(b.score)
        .cmp(&OrderedFloat(a.score))
        .then_with(|| b.stars.cmp(&a.stars))
        .then_with(|| a.id.cmp(&b.id))
}
