//! Runtime contracts for the ranking invariants.
//!
//! Debug-mode assertions that verify the properties every ranked output
//! relies on. These contracts:
//!
//! 1. Are **zero-cost in release builds** (use `debug_assert!`)
//! 2. Provide **early failure detection** during development
//! 3. Mirror the properties exercised in `tests/property/`
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function                    | Property                               |
//! |--------------------------------------|----------------------------------------|
//! | `check_score_in_unit_range`          | every total and boosted score in [0,1] |
//! | `check_effective_weights_normalized` | renormalized weights sum to 1          |
//! | `check_within_capacity`              | top-K never exceeds K                  |
//! | `check_sorted_descending`            | drained/ranked output is best first    |
//!
//! # Usage
//!
//! ```ignore
//! use affinity::contracts::*;
//!
//! // In debug builds, this panics if the invariant is violated
//! check_score_in_unit_range(total);
//!
//! // In release builds, this is a no-op
//! ```

// ============================================================================
// COMPILE-TIME ASSERTIONS (evaluated at build time)
// ============================================================================

/// The default weight table is a convex combination.
/// Evaluated at compile time - if it fails, the crate won't build.
const _: () = {
    use crate::scoring::{CONTRIBUTORS_WEIGHT, ORGANIZATION_WEIGHT, TOPICS_WEIGHT, VECTOR_WEIGHT};

    const SUM: f64 = ORGANIZATION_WEIGHT + TOPICS_WEIGHT + CONTRIBUTORS_WEIGHT + VECTOR_WEIGHT;
    assert!(SUM > 1.0 - 1e-9 && SUM < 1.0 + 1e-9);

    // Organization is the strongest single signal.
    assert!(ORGANIZATION_WEIGHT > TOPICS_WEIGHT);
    assert!(ORGANIZATION_WEIGHT > VECTOR_WEIGHT);
};

/// Tolerance for floating-point sums.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

// ============================================================================
// SCORE CONTRACTS
// ============================================================================

/// Check that a score lies in `[0, 1]`.
///
/// # Panics (debug builds only)
/// Panics if the score is NaN or outside the unit interval.
#[inline]
pub fn check_score_in_unit_range(score: f64) {
    debug_assert!(
        (0.0..=1.0).contains(&score),
        "Contract violation: score {} outside [0, 1]",
        score
    );
}

/// Check that renormalized weights form a convex combination.
///
/// # Panics (debug builds only)
/// Panics if any weight is negative or the weights do not sum to 1.
#[inline]
pub fn check_effective_weights_normalized(weights: impl Iterator<Item = f64>) {
    if cfg!(debug_assertions) {
        let mut sum = 0.0;
        for weight in weights {
            debug_assert!(
                weight >= 0.0,
                "Contract violation: negative effective weight {}",
                weight
            );
            sum += weight;
        }
        debug_assert!(
            (sum - 1.0).abs() < WEIGHT_TOLERANCE,
            "Contract violation: effective weights sum to {} (expected 1)",
            sum
        );
    }
}

// ============================================================================
// SELECTION CONTRACTS
// ============================================================================

/// Check the top-K buffer never grows past its capacity.
#[inline]
pub fn check_within_capacity(len: usize, capacity: usize) {
    debug_assert!(
        len <= capacity,
        "Contract violation: top-K holds {} entries (capacity {})",
        len,
        capacity
    );
}

/// Check scores are in non-increasing order.
///
/// # Panics (debug builds only)
/// Panics at the first adjacent pair where a later score beats an earlier one.
#[inline]
pub fn check_sorted_descending(scores: impl Iterator<Item = f64>) {
    if cfg!(debug_assertions) {
        let mut previous: Option<f64> = None;
        for (i, score) in scores.enumerate() {
            if let Some(prev) = previous {
                debug_assert!(
                    prev >= score,
                    "Contract violation: output not sorted - position {} ({}) > position {} ({})",
                    i,
                    score,
                    i - 1,
                    prev
                );
            }
            previous = Some(score);
        }
    }
}
