//! End-to-end ranking scenarios over in-memory catalogs.

use crate::common::*;
use affinity::{RelatedOptions, WeightTable};

#[test]
fn test_empty_catalog_returns_nothing() {
    let target = make_item("t", "acme/target");
    assert!(related(&target, vec![]).is_empty());
}

#[test]
fn test_same_org_with_nothing_else_is_perfect_match() {
    let target = make_item("t", "acme/target");
    let results = related(&target, vec![make_item("a", "acme/other")]);
    assert_eq!(results.len(), 1);
    assert_close(results[0].score, 1.0);
    assert_eq!(results[0].explanation, vec!["same organization 'acme'"]);
}

#[test]
fn test_below_threshold_is_excluded() {
    // Different owner (0.0) and topics {a,b} vs {a,c,d,e} -> 0.2.
    // Renormalized over org + topics: 0.25/0.55 * 0.2 ~ 0.09, under 0.25.
    let target = make_item_with_topics("t", "acme/target", &["a", "b"]);
    let candidate = make_item_with_topics("c", "other/c", &["a", "c", "d", "e"]);
    assert!(related(&target, vec![candidate]).is_empty());
}

#[test]
fn test_score_of_point_two_is_excluded_by_default_threshold() {
    // Topics alone, Jaccard 1/5 = 0.2.
    let options = RelatedOptions {
        weights: WeightTable::new(0.0, 1.0, 0.0, 0.0).unwrap(),
        ..Default::default()
    };
    let target = make_item_with_topics("t", "acme/target", &["a", "b", "c"]);
    let candidate = make_item_with_topics("c", "other/c", &["a", "d", "e"]);
    assert!(related_with(options, &target, vec![candidate]).is_empty());
}

#[test]
fn test_ranking_prefers_more_shared_signals() {
    let target = make_item("t", "acme/target")
        .with_topics(&["rust", "cli"])
        .with_contributors(&["ann", "bob"]);
    let strong = make_item("strong", "acme/strong")
        .with_topics(&["rust", "cli"])
        .with_contributors(&["ann", "bob"]);
    let medium = make_item("medium", "acme/medium").with_topics(&["rust", "web"]);
    let weak = make_item("weak", "other/weak").with_topics(&["rust", "cli"]);

    let results = related(&target, vec![weak, medium, strong]);
    assert_eq!(result_ids(&results), vec!["strong", "medium", "weak"]);
    assert_well_formed(&results, &RelatedOptions::default());
}

#[test]
fn test_max_results_truncates() {
    let target = make_item("t", "acme/target");
    let catalog: Vec<_> = (0..12)
        .map(|i| make_item(&format!("a{}", i), &format!("acme/r{}", i)))
        .collect();
    let results = related(&target, catalog);
    assert_eq!(results.len(), 5);
}

#[test]
fn test_equal_scores_keep_source_order() {
    let target = make_item("t", "acme/target");
    let catalog: Vec<_> = ["z", "m", "a", "q", "b", "c"]
        .iter()
        .map(|id| make_item(id, &format!("acme/{}", id)))
        .collect();
    let results = related(&target, catalog);
    assert_eq!(result_ids(&results), vec!["z", "m", "a", "q", "b"]);
}

#[test]
fn test_noise_never_reaches_output() {
    let target = make_item("t", "acme/target");
    let mut catalog = make_noise(250);
    catalog.push(make_item("real", "acme/real"));
    let results = related(&target, catalog);
    assert_eq!(result_ids(&results), vec!["real"]);
}

#[test]
fn test_components_report_unavailable_signals() {
    let target = make_item_with_embedding("t", "acme/target", &[1.0, 0.0]);
    let candidate = make_item_with_embedding("c", "acme/c", &[1.0, 0.0]);
    let results = related(&target, vec![candidate]);
    let components = results[0].components;
    assert_eq!(components.organization, Some(1.0));
    assert_eq!(components.topics, None);
    assert_eq!(components.contributors, None);
    assert!(components.vector.is_some());
}

#[test]
fn test_explanations_list_shared_names() {
    let target = make_item("t", "x/target").with_topics(&["a", "b", "c", "d"]);
    let candidate = make_item("c", "y/c").with_topics(&["a", "b", "c", "d"]);
    let results = related(&target, vec![candidate]);
    assert_eq!(results[0].explanation, vec!["4 shared topics (a, b, c, ...)"]);
}

#[test]
fn test_idempotent_over_unchanged_catalog() {
    let target = make_item("t", "acme/target").with_topics(&["rust"]);
    let catalog: Vec<_> = (0..40)
        .map(|i| {
            let owner = if i % 3 == 0 { "acme" } else { "other" };
            make_item_with_topics(&format!("c{}", i), &format!("{}/r{}", owner, i), &["rust", "cli"])
        })
        .collect();
    let first = related(&target, catalog.clone());
    let second = related(&target, catalog);
    assert_eq!(first, second);
}
