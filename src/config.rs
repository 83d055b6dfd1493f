// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! JSON configuration.
//!
//! Every field has a default, so `{}` is a valid config and a file only
//! needs the keys it changes:
//!
//! ```json
//! {
//!   "related": { "minScore": 0.3, "weights": { "vector": 0.0 } },
//!   "rerank": { "limit": 20 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::related::RelatedOptions;
use crate::rerank::RerankOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub related: RelatedOptions,
    pub rerank: RerankOptions,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.related.validate()?;
        self.rerank.validate()
    }
}
