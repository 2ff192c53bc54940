// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Chunk Pusher Port
//!
//! Sends one chunk payload and returns once the receiver has ACKed it or
//! retries are exhausted. Implementations own the bounded-retry policy
//! (three attempts total, no backoff); the domain only sees the final
//! outcome.

use async_trait::async_trait;

use crate::error::IngestError;
use crate::value_objects::ChunkPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushOutcome {
    pub acked: bool,
}

#[async_trait]
pub trait ChunkPusher: Send + Sync {
    /// Pushes `chunk` to `callback_url`, retrying per the implementation's
    /// bounded policy. Returns `Ok(())` only on a final ACK; any other
    /// outcome (exhausted retries on NACK or transport failure) is an
    /// `Err(IngestError::Nack { .. } | IngestError::Transport(_))`.
    async fn push(&self, callback_url: &str, chunk: &ChunkPayload) -> Result<(), IngestError>;

    /// Sends the completion notification after the final chunk's ACK.
    /// Returns whether the receiver ACKed the completion notification.
    async fn push_completion(
        &self,
        callback_url: &str,
        ingestion_id: &crate::value_objects::IngestionId,
        chunk_number: u64,
        total_records: u64,
    ) -> Result<PushOutcome, IngestError>;
}
