// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Ingestion State
//!
//! One row per ingestion ID in the durable state store. Created on first
//! chunk ACK (or lazily at pipeline start), mutated only through
//! `IngestionStateStore::update_chunk` / `mark_completed`, and never deleted
//! except by an explicit `re_ingestion` reset.
//!
//! ## Invariants
//!
//! 1. `last_chunk` is advanced only after a successful ACK for
//!    `last_chunk + 1`.
//! 2. `total_records` equals the sum of record counts of chunks
//!    `0..=last_chunk`.
//! 3. A `Completed` ingestion is never re-pushed unless `re_ingestion = true`
//!    resets its state first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::IngestionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngestionStatus {
    InProgress,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionState {
    pub ingestion_id: IngestionId,
    /// -1 when no chunk has ever been committed.
    pub last_chunk: i64,
    pub total_records: i64,
    pub status: IngestionStatus,
    pub updated_at: DateTime<Utc>,
}

impl IngestionState {
    /// The state of an ingestion that has never committed a chunk.
    pub fn fresh(ingestion_id: IngestionId) -> Self {
        Self {
            ingestion_id,
            last_chunk: -1,
            total_records: 0,
            status: IngestionStatus::InProgress,
            updated_at: Utc::now(),
        }
    }

    /// The chunk number the pipeline should produce next.
    pub fn next_chunk_number(&self) -> u64 {
        (self.last_chunk + 1) as u64
    }
}
