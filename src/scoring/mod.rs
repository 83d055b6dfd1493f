// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how candidates and search hits get their numbers.
//!
//! Two independent consumers share one philosophy: combine a handful of
//! bounded factors, then clamp into `[0, 1]`.
//!
//! - `combiner` turns per-signal relatedness scores into one total, spreading
//!   the weight of missing signals over the ones that fired.
//! - `booster` nudges a full-text relevance score up for popular items and down
//!   for stale ones.
//! - `ranking` holds the comparators, so every ordered output in the crate
//!   breaks ties the same way.

mod booster;
mod combiner;
pub mod ranking;

pub use booster::*;
pub use combiner::*;
