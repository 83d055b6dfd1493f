// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Related items: rank a candidate population against one target.
//!
//! ```text
//! CandidateSource ──batches──▶ signals ──▶ combiner ──▶ BoundedTopK(K)
//!                                                          │ drain
//!                                                          ▼
//!                              RankedResult ◀── explain ◀── threshold + take(N)
//! ```
//!
//! The source is pulled lazily, one batch at a time, so only the current
//! batch and the K best candidates so far are ever in memory.

mod engine;
mod explain;
mod source;

pub use engine::*;
pub use explain::*;
pub use source::*;
