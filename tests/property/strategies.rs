//! Shared proptest strategies.

use affinity::ItemView;
use proptest::prelude::*;

use crate::common::fixed_now;

/// A small owner vocabulary so organization matches actually happen.
pub fn owner_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["acme", "Acme", "globex", "initech", "umbrella"]).prop_map(str::to_string)
}

/// Topic sets drawn from a small vocabulary, sometimes empty.
pub fn topics_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec!["rust", "cli", "web", "db", "ml", "async", "wasm"]),
        0..5,
    )
    .prop_map(|topics| topics.into_iter().map(str::to_string).collect())
}

pub fn contributors_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-f]{1,2}", 0..14)
}

/// Fixed 4-dimensional embeddings, sometimes absent.
pub fn embedding_strategy() -> impl Strategy<Value = Option<Vec<f32>>> {
    prop::option::of(prop::collection::vec(-1.0f32..1.0, 4))
}

pub fn item_strategy(id: String) -> impl Strategy<Value = ItemView> {
    (
        owner_strategy(),
        topics_strategy(),
        contributors_strategy(),
        embedding_strategy(),
        0u64..100_000,
    )
        .prop_map(move |(owner, topics, contributors, embedding, stars)| {
            let mut item = ItemView::new(id.clone(), &format!("{}/{}", owner, id), fixed_now())
                .with_topics(&topics)
                .with_contributors(&contributors)
                .with_stars(stars);
            if let Some(embedding) = embedding {
                item = item.with_embedding(embedding);
            }
            item
        })
}

/// A catalog of 0..max items with unique ids `c0`, `c1`, ...
pub fn catalog_strategy(max: usize) -> impl Strategy<Value = Vec<ItemView>> {
    (0..max).prop_flat_map(|len| {
        (0..len)
            .map(|i| item_strategy(format!("c{}", i)))
            .collect::<Vec<_>>()
    })
}
