//! Bounded top-K properties, checked against a sort-everything oracle.

use std::collections::{HashMap, HashSet};

use affinity::BoundedTopK;
use proptest::prelude::*;

/// Oracle: best offer per key (first seen wins on ties), then stable sort
/// by score descending and take `capacity`.
fn oracle(offers: &[(u8, f64)], capacity: usize) -> Vec<(u8, f64)> {
    let mut best: HashMap<u8, (f64, usize)> = HashMap::new();
    for (seq, &(key, score)) in offers.iter().enumerate() {
        match best.get(&key) {
            Some(&(held, _)) if held >= score => {}
            _ => {
                best.insert(key, (score, seq));
            }
        }
    }
    let mut entries: Vec<(u8, f64, usize)> = best.into_iter().map(|(k, (s, q))| (k, s, q)).collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.2.cmp(&b.2)));
    entries.into_iter().take(capacity).map(|(k, s, _)| (k, s)).collect()
}

fn offers_strategy() -> impl Strategy<Value = Vec<(u8, f64)>> {
    // Coarse scores so ties are common.
    prop::collection::vec((0u8..40, (0u8..=10).prop_map(|s| f64::from(s) / 10.0)), 0..200)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: the buffer never holds more than its capacity.
    #[test]
    fn prop_never_exceeds_capacity(offers in offers_strategy(), capacity in 1usize..20) {
        let mut topk = BoundedTopK::new(capacity).unwrap();
        for (key, score) in offers {
            topk.offer(key, score, ());
            prop_assert!(topk.len() <= capacity);
        }
    }

    /// Property: drain is sorted descending with no duplicate keys.
    #[test]
    fn prop_drain_sorted_and_unique(offers in offers_strategy(), capacity in 1usize..20) {
        let mut topk = BoundedTopK::new(capacity).unwrap();
        for (key, score) in offers {
            topk.offer(key, score, ());
        }
        let drained = topk.drain();
        let mut seen = HashSet::new();
        for pair in drained.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        for entry in &drained {
            prop_assert!(seen.insert(entry.key), "duplicate key {}", entry.key);
        }
    }

    /// Property: with distinct keys, the result matches the oracle exactly,
    /// including the first-seen tie-break.
    #[test]
    fn prop_matches_oracle_for_distinct_keys(
        scores in prop::collection::vec((0u8..=10).prop_map(|s| f64::from(s) / 10.0), 0..150),
        capacity in 1usize..20,
    ) {
        let offers: Vec<(u8, f64)> = scores.into_iter().enumerate().map(|(i, s)| (i as u8, s)).collect();
        let mut topk = BoundedTopK::new(capacity).unwrap();
        for &(key, score) in &offers {
            topk.offer(key, score, ());
        }
        let actual: Vec<(u8, f64)> = topk.drain().into_iter().map(|e| (e.key, e.score)).collect();
        prop_assert_eq!(actual, oracle(&offers, capacity));
    }

    /// Property: the weakest held score is the bar for newcomers.
    #[test]
    fn prop_min_score_is_last_drained(offers in offers_strategy(), capacity in 1usize..20) {
        let mut topk = BoundedTopK::new(capacity).unwrap();
        for (key, score) in offers {
            topk.offer(key, score, ());
        }
        let min = topk.min_score();
        let drained = topk.drain();
        prop_assert_eq!(min, drained.last().map(|e| e.score));
    }
}
