//! Combiner tests through real signal output.

use crate::common::*;
use affinity::{compute_signals, Signal, WeightTable, WeightedCombiner};

#[test]
fn test_same_org_nothing_else_totals_one() {
    let target = make_item("1", "acme/a");
    let candidate = make_item("2", "acme/b");
    let signals = compute_signals(&target, &candidate).unwrap();
    let combined = WeightedCombiner::default().combine(&signals);
    assert_close(combined.total, 1.0);
    assert_eq!(combined.contributions.len(), 1);
}

#[test]
fn test_all_four_signals_use_nominal_weights() {
    let target = make_item("1", "acme/a")
        .with_topics(&["a", "b"])
        .with_contributors(&["ann", "bob"])
        .with_embedding(vec![1.0, 0.0]);
    let candidate = make_item("2", "other/b")
        .with_topics(&["a", "c"])
        .with_contributors(&["bob"])
        .with_embedding(vec![0.0, 1.0]);
    let signals = compute_signals(&target, &candidate).unwrap();
    let combined = WeightedCombiner::default().combine(&signals);

    // org 0, topics 1/3, contributors 1/1, vector 0
    assert_close(combined.total, 0.25 / 3.0 + 0.25);
    assert_close(combined.contribution(Signal::Vector).unwrap().weight, 0.20);
}

#[test]
fn test_custom_weights_change_ranking_inputs() {
    let topics_only = WeightTable::new(0.0, 1.0, 0.0, 0.0).unwrap();
    let target = make_item_with_topics("1", "acme/a", &["a", "b"]);
    let candidate = make_item_with_topics("2", "acme/b", &["a"]);
    let signals = compute_signals(&target, &candidate).unwrap();
    let combined = WeightedCombiner::new(topics_only).combine(&signals);
    assert_close(combined.total, 0.5);
}
