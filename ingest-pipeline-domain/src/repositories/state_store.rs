// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Ingestion State Store Port
//!
//! A small embedded key-value store keyed by ingestion ID. `update_chunk`
//! is called **only** after a successful ACK and must be durable before
//! returning - the pipeline treats a failed write as a failed chunk.

use async_trait::async_trait;

use crate::error::IngestError;
use crate::value_objects::IngestionId;

#[async_trait]
pub trait IngestionStateStore: Send + Sync {
    /// `last_chunk` for `id`, or `-1` when absent.
    async fn get_last_chunk(&self, id: IngestionId) -> Result<i64, IngestError>;

    /// `total_records` for `id`, or `0` when absent.
    async fn get_total_records(&self, id: IngestionId) -> Result<i64, IngestError>;

    /// Atomic upsert, durable before returning. Called only after a
    /// successful ACK for `chunk_number`.
    async fn update_chunk(
        &self,
        id: IngestionId,
        chunk_number: u64,
        total_records: u64,
    ) -> Result<(), IngestError>;

    /// Marks the ingestion `Completed` after its completion notification
    /// is ACKed.
    async fn mark_completed(&self, id: IngestionId) -> Result<(), IngestError>;

    /// Deletes all state for `id`. Invoked when `re_ingestion = true`.
    async fn reset(&self, id: IngestionId) -> Result<(), IngestError>;

    /// Whether `id` has already reached `Completed` - used to enforce that
    /// a completed ingestion is never re-pushed, without a caller needing
    /// to parse status strings.
    async fn is_completed(&self, id: IngestionId) -> Result<bool, IngestError>;
}
