// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Popularity and recency boost for full-text relevance scores.
//!
//! ```text
//! star_boost = 1 + 0.1 · log10(stars + 1) / 6
//! recency    = 1 - 0.2 · min(1, days_since_update / 365)
//! final      = clamp(base · star_boost · recency, 0, 1)
//! ```
//!
//! A million stars buys about +10%. A year without updates costs 20%, and the
//! decay stops there. Both factors multiply, so a zero base stays zero: no
//! amount of popularity manufactures relevance from nothing.

use chrono::{DateTime, Utc};

use crate::contracts::check_score_in_unit_range;
use crate::error::{Error, Result};

/// Star boost coefficient: the ceiling of the boost at `log10(stars+1) = 6`.
pub const STAR_BOOST_COEFFICIENT: f64 = 0.1;

/// Orders of magnitude of stars that earn the full coefficient.
pub const STAR_LOG_SCALE: f64 = 6.0;

/// Largest recency penalty (20%).
pub const MAX_RECENCY_DECAY: f64 = 0.2;

/// Days after which the recency penalty stops growing.
pub const RECENCY_HORIZON_DAYS: f64 = 365.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Logarithmic popularity multiplier, always `>= 1`.
pub fn star_boost(stars: u64) -> f64 {
    1.0 + STAR_BOOST_COEFFICIENT * (stars as f64 + 1.0).log10() / STAR_LOG_SCALE
}

/// Whole and fractional days between `updated_at` and `now`, floored at 0.
pub fn days_since(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let elapsed = (now - updated_at).num_milliseconds() as f64 / MILLIS_PER_DAY;
    elapsed.max(0.0)
}

/// Linear staleness multiplier in `[0.8, 1]`.
pub fn recency_decay(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let days = days_since(updated_at, now);
    1.0 - MAX_RECENCY_DECAY * (days / RECENCY_HORIZON_DAYS).min(1.0)
}

/// Boost a base relevance score by popularity and recency.
///
/// The base is assumed to already be in `[0, 1]`; a non-positive base
/// returns 0. Future timestamps are a caller error, checked by
/// [`validate_boost_input`] at the boundary. Here they simply count as
/// zero days elapsed.
pub fn boost(base_score: f64, stars: u64, updated_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    if base_score <= 0.0 {
        return 0.0;
    }

    let boosted = base_score * star_boost(stars) * recency_decay(updated_at, now);
    let final_score = boosted.clamp(0.0, 1.0);
    check_score_in_unit_range(final_score);
    final_score
}

/// Boundary check for booster inputs.
///
/// Rejects base scores that are NaN, infinite or outside `[0, 1]`, and
/// `updated_at` values later than `now`.
pub fn validate_boost_input(
    id: &str,
    base_score: f64,
    updated_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<()> {
    if !base_score.is_finite() || !(0.0..=1.0).contains(&base_score) {
        return Err(Error::InvalidScore {
            id: id.to_string(),
            score: base_score,
        });
    }
    if updated_at > now {
        return Err(Error::FutureTimestamp { id: id.to_string() });
    }
    Ok(())
}
