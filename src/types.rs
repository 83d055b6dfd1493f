// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a relatedness computation.
//!
//! `ItemRecord` is what the store persists. `ItemView` is the slimmed-down
//! projection the scorers actually look at: owner key already derived, topics
//! already normalized and deduplicated, contributors already cut down to the top 10.
//! Doing that work once per record keeps the signal functions pure and cheap.
//!
//! # Invariants
//!
//! - **ItemView.owner_key** is never empty for a record with a non-empty
//!   full name. Organization match is therefore always computable.
//! - **ItemView.top_contributors** holds at most [`MAX_TOP_CONTRIBUTORS`]
//!   distinct, normalized logins, highest contribution count first.
//! - **ItemView.topics** holds distinct normalized, non-empty strings in the
//!   order they were first listed. Explanations name shared topics in that order.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::{normalize_key, owner_key};

/// Contributor lists are capped here before any comparison.
pub const MAX_TOP_CONTRIBUTORS: usize = 10;

/// Stable item identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        ItemId(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    #[serde(default)]
    pub contributions: u64,
}

/// A stored item as the external store hands it over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: String,
    /// Namespaced identifier, `owner/name`.
    pub full_name: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub contributors: Vec<Contributor>,
    /// Present only if an upstream embedding step already ran.
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
    #[serde(default)]
    pub stars: u64,
    pub updated_at: DateTime<Utc>,
}

/// The projection of an item that the scorers need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: ItemId,
    pub full_name: String,
    pub owner_key: String,
    pub topics: Vec<String>,
    pub top_contributors: Vec<String>,
    pub embedding: Option<Vec<f32>>,
    pub stars: u64,
    pub updated_at: DateTime<Utc>,
}

impl ItemView {
    /// Minimal view: identity only, no topics, contributors or embedding.
    pub fn new(id: impl Into<ItemId>, full_name: &str, updated_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.to_string(),
            owner_key: owner_key(full_name),
            topics: Vec::new(),
            top_contributors: Vec::new(),
            embedding: None,
            stars: 0,
            updated_at,
        }
    }

    /// Project a stored record into the scoring view.
    ///
    /// Contributors are ranked by contribution count (stable, so equal counts
    /// keep their stored order), deduplicated by normalized login and cut to
    /// the top [`MAX_TOP_CONTRIBUTORS`].
    pub fn from_record(record: ItemRecord) -> Self {
        let mut contributors = record.contributors;
        contributors.sort_by(|a, b| b.contributions.cmp(&a.contributions));
        let logins: Vec<String> = contributors.iter().map(|c| c.login.as_str()).map(normalize_key).collect();

        Self {
            id: ItemId(record.id),
            owner_key: owner_key(&record.full_name),
            full_name: record.full_name,
            topics: normalize_topics(&record.topics),
            top_contributors: cap_contributors(logins),
            embedding: record.embedding,
            stars: record.stars,
            updated_at: record.updated_at,
        }
    }

    /// Index of the first NaN or infinite embedding component, if any.
    pub fn non_finite_embedding_index(&self) -> Option<usize> {
        self.embedding.as_ref()?.iter().position(|x| !x.is_finite())
    }

    pub fn with_topics<S: AsRef<str>>(mut self, topics: &[S]) -> Self {
        self.topics = normalize_topics(topics);
        self
    }

    /// Logins in rank order, highest contributor first.
    pub fn with_contributors<S: AsRef<str>>(mut self, logins: &[S]) -> Self {
        self.top_contributors =
            cap_contributors(logins.iter().map(|l| normalize_key(l.as_ref())).collect());
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn with_stars(mut self, stars: u64) -> Self {
        self.stars = stars;
        self
    }
}

fn normalize_topics<S: AsRef<str>>(topics: &[S]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    topics
        .iter()
        .map(|t| normalize_key(t.as_ref()))
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect()
}

fn cap_contributors(logins: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    logins
        .into_iter()
        .filter(|login| !login.is_empty() && seen.insert(login.clone()))
        .take(MAX_TOP_CONTRIBUTORS)
        .collect()
}

/// Per-signal scores behind a ranked result. `None` means the signal had no
/// data for this pair, which is different from a score of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponents {
    pub organization: Option<f64>,
    pub topics: Option<f64>,
    pub contributors: Option<f64>,
    pub vector: Option<f64>,
}

/// One entry of the related-items output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    pub id: ItemId,
    pub full_name: String,
    pub score: f64,
    /// Human-readable fragments, strongest contribution first.
    pub explanation: Vec<String>,
    pub components: ScoreComponents,
}
