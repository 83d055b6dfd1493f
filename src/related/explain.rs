// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Human-readable reasons behind a related-item score.
//!
//! One fragment per signal whose weighted contribution clears the
//! materiality threshold, strongest contribution first. Equal contributions
//! fall back to signal order (organization, topics, contributors, vector).

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::scoring::{CombinedScore, Contribution};
use crate::signals::Signal;
use crate::types::ItemView;

/// A signal must contribute more than this to be mentioned.
pub const MATERIALITY_THRESHOLD: f64 = 0.0;

/// Shared topics/contributors listed by name before eliding with "...".
pub const MAX_LISTED: usize = 3;

/// Fallback when nothing clears the materiality threshold.
pub const GENERIC_EXPLANATION: &str = "related";

pub fn build_explanation(target: &ItemView, candidate: &ItemView, combined: &CombinedScore) -> Vec<String> {
    let mut material: Vec<&Contribution> = combined
        .contributions
        .iter()
        .filter(|c| c.contribution > MATERIALITY_THRESHOLD)
        .collect();
    material.sort_by(|a, b| {
        b.contribution
            .partial_cmp(&a.contribution)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.signal.cmp(&b.signal))
    });

    let fragments: Vec<String> = material
        .into_iter()
        .filter_map(|c| fragment(c, target, candidate))
        .collect();

    if fragments.is_empty() {
        vec![GENERIC_EXPLANATION.to_string()]
    } else {
        fragments
    }
}

fn fragment(contribution: &Contribution, target: &ItemView, candidate: &ItemView) -> Option<String> {
    match contribution.signal {
        Signal::Organization => Some(format!("same organization '{}'", target.owner_key)),
        Signal::Topics => {
            let ours: BTreeSet<&str> = target.topics.iter().map(String::as_str).collect();
            let shared: Vec<&str> = candidate
                .topics
                .iter()
                .map(String::as_str)
                .filter(|topic| ours.contains(topic))
                .collect();
            listed("topic", "topics", &shared)
        }
        Signal::Contributors => {
            let theirs: BTreeSet<&str> = candidate.top_contributors.iter().map(String::as_str).collect();
            let shared: Vec<&str> = target
                .top_contributors
                .iter()
                .map(String::as_str)
                .filter(|login| theirs.contains(login))
                .collect();
            listed("contributor", "contributors", &shared)
        }
        Signal::Vector => Some(format!("high vector similarity ({:.2})", contribution.score)),
    }
}

/// `shared topic (x)`, `2 shared topics (x, y)`, `5 shared topics (x, y, z, ...)`.
fn listed(singular: &str, plural: &str, names: &[&str]) -> Option<String> {
    match names.len() {
        0 => None,
        1 => Some(format!("shared {} ({})", singular, names[0])),
        n if n <= MAX_LISTED => Some(format!("{} shared {} ({})", n, plural, names.join(", "))),
        n => Some(format!(
            "{} shared {} ({}, ...)",
            n,
            plural,
            names[..MAX_LISTED].join(", ")
        )),
    }
}
