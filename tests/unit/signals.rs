//! Signal scorer tests: availability rules and exact values.

use crate::common::*;
use affinity::signals::{
    cosine_similarity, organization_match, shared_contributors, topic_overlap, vector_similarity,
};
use affinity::{Error, Signal, SignalValue};

#[test]
fn test_organization_is_case_insensitive() {
    let a = make_item("1", "Acme/a");
    let b = make_item("2", "acme/b");
    assert_eq!(organization_match(&a, &b).score(), Some(1.0));
    assert_eq!(organization_match(&a, &make_item("3", "other/c")).score(), Some(0.0));
}

#[test]
fn test_topics_jaccard() {
    let a = make_item_with_topics("1", "x/a", &["a", "b", "c"]);
    let b = make_item_with_topics("2", "y/b", &["b", "c", "d"]);
    assert_eq!(topic_overlap(&a, &b).score(), Some(0.5));
}

#[test]
fn test_topics_both_empty_is_unavailable() {
    let result = topic_overlap(&make_item("1", "x/a"), &make_item("2", "y/b"));
    assert_eq!(result.signal, Signal::Topics);
    assert_eq!(result.value, SignalValue::Unavailable);
}

#[test]
fn test_topics_one_side_empty_is_zero() {
    let a = make_item_with_topics("1", "x/a", &["rust"]);
    let result = topic_overlap(&a, &make_item("2", "y/b"));
    assert_eq!(result.score(), Some(0.0));
}

#[test]
fn test_contributors_normalized_by_smaller_list() {
    let a = make_item_with_contributors("1", "x/a", &["ann", "bob", "cat", "dan"]);
    let b = make_item_with_contributors("2", "y/b", &["bob", "eve"]);
    assert_eq!(shared_contributors(&a, &b).score(), Some(0.5));
}

#[test]
fn test_contributors_one_side_empty_is_unavailable() {
    let a = make_item_with_contributors("1", "x/a", &["ann"]);
    assert!(!shared_contributors(&a, &make_item("2", "y/b")).is_available());
}

#[test]
fn test_contributors_only_top_ten_count() {
    let logins: Vec<String> = (0..12).map(|i| format!("user{}", i)).collect();
    let refs: Vec<&str> = logins.iter().map(String::as_str).collect();
    let a = make_item_with_contributors("1", "x/a", &refs);
    // user10 and user11 fell off a's list
    let b = make_item_with_contributors("2", "y/b", &["user10", "user11"]);
    assert_eq!(shared_contributors(&a, &b).score(), Some(0.0));
}

#[test]
fn test_vector_missing_embedding_is_unavailable() {
    let a = make_item_with_embedding("1", "x/a", &[1.0, 0.0]);
    assert!(!vector_similarity(&a, &make_item("2", "y/b")).unwrap().is_available());
}

#[test]
fn test_vector_opposite_directions_clamp_to_zero() {
    let a = make_item_with_embedding("1", "x/a", &[1.0, 0.0]);
    let b = make_item_with_embedding("2", "y/b", &[-1.0, 0.0]);
    assert_eq!(vector_similarity(&a, &b).unwrap().score(), Some(0.0));
}

#[test]
fn test_vector_dimension_mismatch_is_an_error() {
    let a = make_item_with_embedding("1", "x/a", &[1.0, 0.0, 0.0]);
    let b = make_item_with_embedding("2", "y/b", &[1.0, 0.0]);
    let err = vector_similarity(&a, &b).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { expected: 3, actual: 2 }));
}

#[test]
fn test_cosine_zero_norm_is_zero() {
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
}

#[test]
fn test_vector_non_finite_component_is_an_error() {
    let a = make_item_with_embedding("1", "x/a", &[1.0, 0.0]);
    let b = make_item_with_embedding("2", "y/b", &[f32::NAN, 1.0]);
    let err = vector_similarity(&a, &b).unwrap_err();
    assert!(matches!(err, Error::InvalidEmbedding { ref id, index: 0 } if id == "2"));

    // the target is checked as well
    let err = vector_similarity(&b, &a).unwrap_err();
    assert!(matches!(err, Error::InvalidEmbedding { ref id, .. } if id == "2"));
}
