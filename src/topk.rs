// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Capacity-bounded best-of selection over a stream.
//!
//! `BoundedTopK` ingests `(key, score, item)` triples in any order and keeps
//! only the best `capacity` of them. Memory is O(capacity) no matter how many
//! items flow through, which is what lets the relatedness engine scan an
//! arbitrarily large candidate population.
//!
//! # Tie-break: first seen wins
//!
//! Every offer gets a sequence number. Entries order by score (descending),
//! then sequence (ascending). At capacity, a newcomer must score *strictly*
//! higher than the current minimum to get in, so an equal-score latecomer
//! never displaces an earlier entry. Same input order, same output, every run.
//!
//! # One entry per key
//!
//! A key already held is replaced only by a strictly better offer. `drain()`
//! therefore never returns the same key twice.
//!
//! **Verified by**:
//! - `tests/property/topk_props.rs`
//! - `fuzz/fuzz_targets/topk_ordering.rs`

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::contracts::{check_sorted_descending, check_within_capacity};
use crate::error::{Error, Result};
use crate::scoring::ranking::compare_scored;

/// Position of an entry in the buffer. `Ord` puts the best entry first.
#[derive(Debug, Clone, Copy)]
struct RankKey {
    score: f64,
    seq: u64,
}

impl PartialEq for RankKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankKey {}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_scored(self.score, self.seq, other.score, other.seq)
    }
}

/// An entry handed back by [`BoundedTopK::drain`].
#[derive(Debug, Clone, PartialEq)]
pub struct TopKEntry<K, T> {
    pub key: K,
    pub score: f64,
    pub item: T,
    /// Encounter order, 0-based.
    pub sequence: u64,
}

#[derive(Debug)]
pub struct BoundedTopK<K, T> {
    capacity: usize,
    /// Best first; the last entry is the current minimum.
    entries: BTreeMap<RankKey, (K, T)>,
    held: HashMap<K, RankKey>,
    next_seq: u64,
}

impl<K: Hash + Eq + Clone, T> BoundedTopK<K, T> {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::Config("top-K capacity must be at least 1".to_string()));
        }
        Ok(Self {
            capacity,
            entries: BTreeMap::new(),
            held: HashMap::with_capacity(capacity),
            next_seq: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Score of the weakest held entry, the bar a newcomer must clear once full.
    pub fn min_score(&self) -> Option<f64> {
        self.entries.last_key_value().map(|(rank, _)| rank.score)
    }

    /// Offer an item. Returns `true` if it is now held.
    pub fn offer(&mut self, key: K, score: f64, item: T) -> bool {
        let rank = RankKey {
            score,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        if let Some(&existing) = self.held.get(&key) {
            if rank >= existing {
                return false;
            }
            self.entries.remove(&existing);
            self.insert(rank, key, item);
            return true;
        }

        if self.entries.len() < self.capacity {
            self.insert(rank, key, item);
            return true;
        }

        match self.entries.last_key_value() {
            Some((worst, _)) if score > worst.score => {
                if let Some((_, (evicted, _))) = self.entries.pop_last() {
                    self.held.remove(&evicted);
                }
                self.insert(rank, key, item);
                true
            }
            _ => false,
        }
    }

    fn insert(&mut self, rank: RankKey, key: K, item: T) {
        self.held.insert(key.clone(), rank);
        self.entries.insert(rank, (key, item));
        check_within_capacity(self.entries.len(), self.capacity);
    }

    /// Best-first view of the held entries without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64, &T)> {
        self.entries
            .iter()
            .map(|(rank, (key, item))| (key, rank.score, item))
    }

    /// Take every held entry, best first. The buffer is empty afterwards but
    /// keeps counting sequence numbers.
    pub fn drain(&mut self) -> Vec<TopKEntry<K, T>> {
        self.held.clear();
        let drained: Vec<TopKEntry<K, T>> = std::mem::take(&mut self.entries)
            .into_iter()
            .map(|(rank, (key, item))| TopKEntry {
                key,
                score: rank.score,
                item,
                sequence: rank.seq,
            })
            .collect();
        check_sorted_descending(drained.iter().map(|e| e.score));
        drained
    }
}
