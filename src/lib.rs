//! Related-item ranking over a large catalog of namespaced items.
//!
//! Given a target item, the engine streams candidates from a source in
//! batches, scores each pair with four independent signals, combines them
//! with a renormalizing weighted sum, and keeps the best K in a bounded
//! buffer. A separate booster adjusts full-text relevance scores by
//! popularity and recency.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  types.rs   │────▶│  signals/    │────▶│  scoring/    │
//! │ (ItemView,  │     │ (org, topics,│     │ (combiner,   │
//! │ RankedResult│     │ contributors,│     │  boost,      │
//! │  ...)       │     │  vector)     │     │  ranking)    │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!        │                                        │
//!        ▼                                        ▼
//! ┌─────────────────────────────────┐     ┌──────────────┐
//! │ related/ (engine, source,       │────▶│   topk.rs    │
//! │           explain)              │     │ (BoundedTopK)│
//! └─────────────────────────────────┘     └──────────────┘
//!        │
//!        ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                    contracts.rs                      │
//! │  (unit-range scores, normalized weights, capacity,  │
//! │   sorted output - debug-mode invariant checks)      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use affinity::{CancellationToken, JsonLinesSource, RelatedOptions, RelatednessEngine};
//!
//! let engine = RelatednessEngine::new(RelatedOptions::default())?;
//! let mut source = JsonLinesSource::open("items.jsonl", Some(target.id.clone()))?;
//! let related = engine.find_related(&target, &mut source, &CancellationToken::new())?;
//! ```

// Module declarations
mod cancel;
pub mod config;
pub mod contracts;
mod error;
pub mod related;
pub mod rerank;
pub mod scoring;
pub mod signals;
pub mod testing;
pub mod topk;
mod types;
mod utils;

// Re-exports for public API
pub use cancel::CancellationToken;
pub use config::Config;
pub use error::{Error, Result, SourceError};
pub use related::{
    build_explanation, find_item, CandidateScore, CandidateSource, JsonLinesSource, RelatedOptions,
    RelatednessEngine, VecSource,
};
pub use rerank::{rerank, RankedHit, RerankOptions, SearchHit};
pub use scoring::{boost, validate_boost_input, CombinedScore, WeightTable, WeightedCombiner};
pub use signals::{compute_signals, Signal, SignalResult, SignalValue};
pub use topk::{BoundedTopK, TopKEntry};
pub use types::{
    Contributor, ItemId, ItemRecord, ItemView, RankedResult, ScoreComponents,
    MAX_TOP_CONTRIBUTORS,
};
pub use utils::{is_qualified_name, normalize_key, owner_key};
