// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the popularity/recency booster.
//!
//! Any base score that passes boundary validation must come out finite and
//! inside [0, 1], with zero relevance staying zero. Inputs that fail
//! validation must be rejected, never boosted.

#![no_main]

use arbitrary::Arbitrary;
use chrono::{DateTime, Duration, Utc};
use libfuzzer_sys::fuzz_target;

use affinity::{boost, validate_boost_input};

#[derive(Arbitrary, Debug)]
struct Input {
    base: f64,
    stars: u64,
    /// Seconds before (positive) or after (negative) `now`.
    age_seconds: i32,
}

fuzz_target!(|input: Input| {
    let now = DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default();
    let updated_at = now - Duration::seconds(i64::from(input.age_seconds));

    if validate_boost_input("fuzz", input.base, updated_at, now).is_err() {
        assert!(
            !input.base.is_finite() || !(0.0..=1.0).contains(&input.base) || updated_at > now
        );
        return;
    }

    let score = boost(input.base, input.stars, updated_at, now);
    assert!(score.is_finite());
    assert!((0.0..=1.0).contains(&score), "boosted {} out of range", score);
    if input.base == 0.0 {
        assert_eq!(score, 0.0);
    }
});
