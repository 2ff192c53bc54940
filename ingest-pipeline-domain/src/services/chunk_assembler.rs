// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Chunk Assembler
//!
//! Groups records into chunks either by record count or by an in-memory
//! footprint estimate. Pure and synchronous: it holds only the records
//! accumulated for the in-progress chunk, performs no I/O, and is driven one
//! record at a time by [`crate::services::IngestionPipeline`]-equivalent
//! orchestration code in the infrastructure layer.
//!
//! The by-memory estimator uses the encoded JSON length of a record as a
//! proxy for its in-memory footprint, rather than a deep heap-size
//! calculation; an adequate proxy applied consistently is enough, and tests
//! must not depend on the exact chunk split this produces.

use crate::value_objects::Record;

/// Which threshold governs when a chunk is flushed.
#[derive(Debug, Clone, Copy)]
pub enum ChunkSize {
    Records(u64),
    MemoryBytes(u64),
}

/// Accumulates records and emits a chunk's worth at a time.
pub struct ChunkAssembler {
    threshold: ChunkSize,
    pending: Vec<Record>,
    pending_bytes: u64,
}

impl ChunkAssembler {
    pub fn new(threshold: ChunkSize) -> Self {
        Self {
            threshold,
            pending: Vec::new(),
            pending_bytes: 0,
        }
    }

    /// Feeds one record in. Returns `Some(chunk)` if adding it caused the
    /// current chunk to fill, in which case the returned chunk does **not**
    /// include `record` - it begins the next chunk instead.
    pub fn push(&mut self, record: Record) -> Option<Vec<Record>> {
        match self.threshold {
            ChunkSize::Records(limit) => {
                self.pending.push(record);
                if self.pending.len() as u64 >= limit {
                    Some(std::mem::take(&mut self.pending))
                } else {
                    None
                }
            }
            ChunkSize::MemoryBytes(limit) => {
                let record_bytes = Self::estimate_bytes(&record);

                // A single record exceeding the limit alone is emitted as a
                // one-record chunk rather than looping forever trying to
                // keep it under budget.
                if self.pending.is_empty() {
                    self.pending.push(record);
                    self.pending_bytes = record_bytes;
                    if self.pending_bytes > limit {
                        return Some(std::mem::take(&mut self.pending));
                    }
                    return None;
                }

                if self.pending_bytes + record_bytes > limit {
                    let flushed = std::mem::take(&mut self.pending);
                    self.pending.push(record);
                    self.pending_bytes = record_bytes;
                    Some(flushed)
                } else {
                    self.pending_bytes += record_bytes;
                    self.pending.push(record);
                    None
                }
            }
        }
    }

    /// Called once the source is exhausted. Returns whatever remains
    /// accumulated, even if it is smaller than the threshold - the caller
    /// marks this chunk `is_last = true`. Returns `None` if nothing is
    /// pending (e.g. the source produced zero non-empty records).
    pub fn flush(&mut self) -> Option<Vec<Record>> {
        if self.pending.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.pending))
        }
    }

    fn estimate_bytes(record: &Record) -> u64 {
        serde_json::to_vec(record).map(|bytes| bytes.len() as u64).unwrap_or(0)
    }
}
