// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for bounded top-K ordering invariants.
//!
//! Whatever sequence of offers arrives, the buffer must stay within its
//! capacity, drain best first, never hand back a key twice, and keep the
//! earliest of equally scored entries.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;

use affinity::BoundedTopK;

#[derive(Arbitrary, Debug)]
struct Input {
    capacity: u8,
    offers: Vec<(u8, u16)>,
}

fuzz_target!(|input: Input| {
    let capacity = usize::from(input.capacity.max(1));
    let Ok(mut topk) = BoundedTopK::new(capacity) else {
        return;
    };

    for &(key, raw) in &input.offers {
        // Coarse scores in [0, 1] so ties are frequent.
        let score = f64::from(raw % 11) / 10.0;
        topk.offer(key, score, ());
        assert!(topk.len() <= capacity);
    }

    let drained = topk.drain();
    let mut keys = HashSet::new();
    for entry in &drained {
        assert!(keys.insert(entry.key), "key {} drained twice", entry.key);
    }
    for pair in drained.windows(2) {
        assert!(pair[0].score >= pair[1].score);
        if pair[0].score == pair[1].score {
            assert!(pair[0].sequence < pair[1].sequence, "tie not broken by first seen");
        }
    }
});
