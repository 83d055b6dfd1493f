// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Similarity signals: four independent ways two items can be related.
//!
//! Each signal is a pure function of (target, candidate). None of them know
//! about weights or about each other. The one rule they all share: a signal
//! that has nothing to compare says `Unavailable`, never `0.0`. Zero means
//! "we looked and they share nothing", and that is information.

mod compute;

pub use compute::*;
