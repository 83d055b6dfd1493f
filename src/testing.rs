//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical item builders and scripted sources so every test
//! constructs fixtures the same way.

#![doc(hidden)]

use chrono::{DateTime, TimeZone, Utc};

use crate::error::SourceError;
use crate::related::CandidateSource;
use crate::types::{Contributor, ItemId, ItemRecord, ItemView};

/// Fixed reference instant so tests never depend on the wall clock.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Create a bare item: identity only, updated at [`fixed_now`].
///
/// This is the canonical implementation used across all tests.
pub fn make_item(id: &str, full_name: &str) -> ItemView {
    ItemView::new(id, full_name, fixed_now())
}

/// Create an item with topics.
pub fn make_item_with_topics(id: &str, full_name: &str, topics: &[&str]) -> ItemView {
    make_item(id, full_name).with_topics(topics)
}

/// Create an item with contributor logins, highest rank first.
pub fn make_item_with_contributors(id: &str, full_name: &str, logins: &[&str]) -> ItemView {
    make_item(id, full_name).with_contributors(logins)
}

/// Create an item with an embedding.
pub fn make_item_with_embedding(id: &str, full_name: &str, embedding: &[f32]) -> ItemView {
    make_item(id, full_name).with_embedding(embedding.to_vec())
}

/// `count` items in a foreign namespace with no shared signals. Each one
/// scores exactly 0 against any target outside `noise/`.
pub fn make_noise(count: usize) -> Vec<ItemView> {
    (0..count)
        .map(|i| make_item(&format!("noise-{}", i), &format!("noise/repo-{}", i)))
        .collect()
}

/// Serialize items as JSON Lines, one `ItemRecord`-compatible object per line.
pub fn to_json_lines(items: &[ItemView]) -> String {
    items.iter().map(to_json_line).collect::<Vec<_>>().join("\n")
}

fn to_json_line(item: &ItemView) -> String {
    // Descending counts reproduce the view's contributor order on reload.
    let total = item.top_contributors.len();
    let contributors: Vec<Contributor> = item
        .top_contributors
        .iter()
        .enumerate()
        .map(|(rank, login)| Contributor {
            login: login.clone(),
            contributions: (total - rank) as u64,
        })
        .collect();

    let record = ItemRecord {
        id: item.id.as_str().to_string(),
        full_name: item.full_name.clone(),
        topics: item.topics.clone(),
        contributors,
        embedding: item.embedding.clone(),
        stars: item.stars,
        updated_at: item.updated_at,
    };
    serde_json::to_string(&record).unwrap_or_default()
}

/// A source that replays a fixed list of batches, then optionally fails.
///
/// Records the batch sizes it was asked for, so tests can assert the engine
/// pulled lazily.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    batches: std::collections::VecDeque<Vec<ItemView>>,
    fail_after: Option<String>,
    pub requested: Vec<usize>,
}

impl ScriptedSource {
    pub fn new(batches: Vec<Vec<ItemView>>) -> Self {
        Self {
            batches: batches.into(),
            ..Default::default()
        }
    }

    /// After the scripted batches run out, return `SourceError::Other(message)`.
    pub fn failing_after(mut self, message: &str) -> Self {
        self.fail_after = Some(message.to_string());
        self
    }

    /// Batches not yet handed out.
    pub fn remaining(&self) -> usize {
        self.batches.len()
    }
}

impl CandidateSource for ScriptedSource {
    fn next_batch(&mut self, batch_size: usize) -> Result<Option<Vec<ItemView>>, SourceError> {
        self.requested.push(batch_size);
        match self.batches.pop_front() {
            Some(batch) => Ok(Some(batch)),
            None => match &self.fail_after {
                Some(message) => Err(SourceError::Other(message.clone())),
                None => Ok(None),
            },
        }
    }
}

/// Ids of a result list, in order.
pub fn ids<'a, I>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ItemId>,
{
    ids.into_iter().map(|id| id.as_str().to_string()).collect()
}
