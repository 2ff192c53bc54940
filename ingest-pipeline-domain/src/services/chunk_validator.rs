// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Chunk Validator (receiver side)
//!
//! Stateful per receiver process, keyed by ingestion ID. Decides ACK or NACK
//! for an incoming chunk by applying, in order: emptiness, duplicate
//! suppression, checksum, ordering.
//!
//! State is intentionally **in-memory only** and not persisted - a receiver
//! restart wipes it, while the sender's state store survives one. This
//! sender/receiver durability asymmetry is preserved here rather than
//! silently patched with a durable-receiver or resume-handshake design.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::services::ChunkIntegrityManager;
use crate::value_objects::{ChunkPayload, IngestionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Ack,
    Nack(&'static str),
}

pub const EMPTY_CHUNK: &str = "EMPTY_CHUNK";
pub const CHECKSUM_MISMATCH: &str = "CHECKSUM_MISMATCH";
pub const OUT_OF_ORDER_CHUNK: &str = "OUT_OF_ORDER_CHUNK";

#[derive(Clone)]
struct Accepted {
    chunk_number: u64,
    chunk_id: String,
    checksum: String,
}

/// Per-process, per-ingestion chunk ordering and duplicate-suppression
/// state. Safe to share across concurrent receiver handlers via `Arc`.
#[derive(Default)]
pub struct ChunkValidator {
    accepted: Mutex<HashMap<IngestionId, Accepted>>,
}

impl ChunkValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the empty/duplicate/checksum/ordering rule chain in order
    /// and records acceptance on ACK.
    pub fn validate(&self, chunk: &ChunkPayload) -> ValidationOutcome {
        if chunk.records.is_empty() {
            return ValidationOutcome::Nack(EMPTY_CHUNK);
        }

        let mut accepted = self.accepted.lock().expect("chunk validator mutex poisoned");
        let last = accepted.get(&chunk.ingestion_id).cloned();

        // Duplicate: same chunk_id and matching checksum as the
        // most-recently-accepted chunk for this ingestion -> silent
        // idempotency, ACK without reprocessing.
        if let Some(last) = &last {
            if last.chunk_id == chunk.chunk_id && last.checksum == chunk.checksum {
                return ValidationOutcome::Ack;
            }
        }

        let expected_checksum = ChunkIntegrityManager::compute_checksum(&chunk.records);
        if expected_checksum != chunk.checksum {
            return ValidationOutcome::Nack(CHECKSUM_MISMATCH);
        }

        let expected_chunk_number = last.as_ref().map(|a| a.chunk_number + 1).unwrap_or(0);
        if chunk.chunk_number != expected_chunk_number {
            return ValidationOutcome::Nack(OUT_OF_ORDER_CHUNK);
        }

        accepted.insert(
            chunk.ingestion_id,
            Accepted {
                chunk_number: chunk.chunk_number,
                chunk_id: chunk.chunk_id.clone(),
                checksum: chunk.checksum.clone(),
            },
        );
        ValidationOutcome::Ack
    }
}
