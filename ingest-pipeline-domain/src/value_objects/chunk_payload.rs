// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Chunk Payload
//!
//! The wire shape pushed to a receiver's `callback_url`. Ephemeral: assembled
//! by [`crate::services::ChunkAssembler`], stamped by
//! [`crate::services::ChunkIntegrityManager`], pushed by a `ChunkPusher`, and
//! discarded once ACKed.

use serde::{Deserialize, Serialize};

use super::{IngestionId, Record};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkPayload {
    pub ingestion_id: IngestionId,
    pub chunk_number: u64,
    pub chunk_id: String,
    pub checksum: String,
    pub records: Vec<Record>,
    pub is_last: bool,
}

impl ChunkPayload {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}
