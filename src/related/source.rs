// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Candidate sources: lazy, finite, non-restartable streams of item batches.
//!
//! A source is responsible for leaving the target out of its own stream. The
//! engine double-checks by id, but a source that leaks the target is still a
//! bug in the source.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::SourceError;
use crate::types::{ItemId, ItemRecord, ItemView};
use crate::utils::normalize_key;

/// Something that can hand over candidates in batches.
pub trait CandidateSource {
    /// Up to `batch_size` candidates, or `None` once the stream is exhausted.
    ///
    /// An empty batch is treated as exhaustion too. Once this returns an
    /// error the stream is dead; the engine will not call it again.
    fn next_batch(&mut self, batch_size: usize) -> Result<Option<Vec<ItemView>>, SourceError>;
}

impl<S: CandidateSource + ?Sized> CandidateSource for &mut S {
    fn next_batch(&mut self, batch_size: usize) -> Result<Option<Vec<ItemView>>, SourceError> {
        (**self).next_batch(batch_size)
    }
}

impl<S: CandidateSource + ?Sized> CandidateSource for Box<S> {
    fn next_batch(&mut self, batch_size: usize) -> Result<Option<Vec<ItemView>>, SourceError> {
        (**self).next_batch(batch_size)
    }
}

/// In-memory source over an owned list of views.
#[derive(Debug)]
pub struct VecSource {
    items: std::vec::IntoIter<ItemView>,
}

impl VecSource {
    pub fn new(items: Vec<ItemView>) -> Self {
        Self {
            items: items.into_iter(),
        }
    }

    /// Same as [`VecSource::new`] but drops every view whose id is `target`.
    pub fn excluding(items: Vec<ItemView>, target: &ItemId) -> Self {
        Self::new(items.into_iter().filter(|item| &item.id != target).collect())
    }
}

impl CandidateSource for VecSource {
    fn next_batch(&mut self, batch_size: usize) -> Result<Option<Vec<ItemView>>, SourceError> {
        let batch: Vec<ItemView> = self.items.by_ref().take(batch_size.max(1)).collect();
        Ok((!batch.is_empty()).then_some(batch))
    }
}

/// File-backed source reading one JSON `ItemRecord` per line.
///
/// Blank lines are skipped. A line that fails to parse ends the stream with
/// `SourceError::Parse`, carrying the 1-based line number.
#[derive(Debug)]
pub struct JsonLinesSource<R> {
    reader: R,
    exclude: Option<ItemId>,
    line: usize,
    buf: String,
}

impl JsonLinesSource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>, exclude: Option<ItemId>) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file), exclude))
    }
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn from_reader(reader: R, exclude: Option<ItemId>) -> Self {
        Self {
            reader,
            exclude,
            line: 0,
            buf: String::new(),
        }
    }

    /// Next record, skipping blank lines. `None` at end of input.
    fn next_record(&mut self) -> Result<Option<ItemRecord>, SourceError> {
        loop {
            self.buf.clear();
            if self.fill_line()? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let trimmed = self.buf.trim();
            if trimmed.is_empty() {
                continue;
            }
            let record: ItemRecord =
                serde_json::from_str(trimmed).map_err(|source| SourceError::Parse {
                    line: self.line,
                    source,
                })?;
            check_embedding(&record, self.line)?;
            return Ok(Some(record));
        }
    }

    /// One line into `buf`. Invalid UTF-8 is reported against the line it sits on.
    fn fill_line(&mut self) -> Result<usize, SourceError> {
        self.reader.read_line(&mut self.buf).map_err(|err| {
            if err.kind() == io::ErrorKind::InvalidData {
                SourceError::InvalidRecord {
                    line: self.line + 1,
                    reason: err.to_string(),
                }
            } else {
                SourceError::Io(err)
            }
        })
    }
}

/// Oversized JSON numbers parse to an infinite `f32`, so they are caught here.
fn check_embedding(record: &ItemRecord, line: usize) -> Result<(), SourceError> {
    let Some(embedding) = &record.embedding else {
        return Ok(());
    };
    match embedding.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(SourceError::InvalidRecord {
            line,
            reason: format!("embedding component {} of '{}' is not finite", index, record.id),
        }),
        None => Ok(()),
    }
}

impl<R: BufRead> CandidateSource for JsonLinesSource<R> {
    fn next_batch(&mut self, batch_size: usize) -> Result<Option<Vec<ItemView>>, SourceError> {
        let batch_size = batch_size.max(1);
        let mut batch = Vec::with_capacity(batch_size);

        while batch.len() < batch_size {
            let Some(record) = self.next_record()? else {
                break;
            };
            let view = ItemView::from_record(record);
            if self.exclude.as_ref() == Some(&view.id) {
                continue;
            }
            batch.push(view);
        }

        Ok((!batch.is_empty()).then_some(batch))
    }
}

/// Scan a JSON Lines file for the record named `full_name` (case-insensitive).
pub fn find_item(path: impl AsRef<Path>, full_name: &str) -> Result<Option<ItemView>, SourceError> {
    let wanted = normalize_key(full_name);
    let mut source = JsonLinesSource::open(path, None)?;
    while let Some(record) = source.next_record()? {
        if normalize_key(&record.full_name) == wanted {
            return Ok(Some(ItemView::from_record(record)));
        }
    }
    Ok(None)
}
