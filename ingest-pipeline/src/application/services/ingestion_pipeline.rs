// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Ingestion Pipeline Orchestrator
//!
//! Drives one ingestion end to end: open the source, resume past any
//! previously-pushed chunks, assemble and push the rest, and report
//! completion. Owns no I/O itself - every side effect goes through the
//! [`RecordSource`], [`ChunkPusher`], and [`IngestionStateStore`] ports it is
//! constructed with, so it can be exercised against in-memory fakes in tests.
//!
//! ## Resume Semantics
//!
//! 1. Read `last_chunk` and `total_records` for the ingestion ID from the
//!    state store. A fresh ingestion starts both at zero.
//! 2. Re-open the source from the beginning - sources have no seek API - and
//!    discard the first `total_records` non-empty records it yields (the
//!    "skip phase").
//! 3. Assemble the remaining records into chunks, stamping each with the
//!    next sequential chunk number, pushing it, and only then committing the
//!    new `last_chunk`/`total_records` to the state store. A chunk is never
//!    recorded as delivered before its ACK.
//! 4. Once the source is exhausted, push a completion notification and mark
//!    the ingestion completed only if that notification is acknowledged.
//!
//! Chunks are pushed strictly in order; the next chunk is never assembled
//! until the previous one's ACK (or final failure) is known.

use std::sync::Arc;

use ingest_pipeline_domain::{
    ChunkAssembler, ChunkIntegrityManager, ChunkPayload, ChunkPusher, ChunkSize, IngestError,
    IngestionId, IngestionRequest, IngestionStateStore, RecordSource,
};
use tracing::{info, instrument, warn};

/// Orchestrates a single ingestion run.
pub struct IngestionPipeline {
    state_store: Arc<dyn IngestionStateStore>,
    pusher: Arc<dyn ChunkPusher>,
}

/// Outcome of a completed (or resumed-and-completed) ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionOutcome {
    pub ingestion_id: IngestionId,
    pub chunks_pushed: u64,
    pub total_records: u64,
}

impl IngestionPipeline {
    pub fn new(state_store: Arc<dyn IngestionStateStore>, pusher: Arc<dyn ChunkPusher>) -> Self {
        Self { state_store, pusher }
    }

    /// Runs `request` against `source` under `ingestion_id`, resuming from
    /// whatever state the store already holds for that ID.
    #[instrument(skip(self, source, request), fields(ingestion_id = %ingestion_id))]
    pub async fn run(
        &self,
        ingestion_id: IngestionId,
        request: &IngestionRequest,
        mut source: Box<dyn RecordSource>,
    ) -> Result<IngestionOutcome, IngestError> {
        if request.re_ingestion {
            self.state_store.reset(ingestion_id).await?;
        }

        let mut last_chunk = self.state_store.get_last_chunk(ingestion_id).await?;
        let mut total_records = self.state_store.get_total_records(ingestion_id).await?;

        info!(last_chunk, total_records, "resuming ingestion");

        let mut skipped = 0u64;
        while skipped < total_records {
            match source.next_record().await? {
                Some(_) => skipped += 1,
                None => {
                    warn!("source exhausted before skip phase completed; treating as already complete");
                    return Ok(IngestionOutcome {
                        ingestion_id,
                        chunks_pushed: (last_chunk + 1) as u64,
                        total_records: total_records as u64,
                    });
                }
            }
        }

        let chunk_size = match request.chunk_size {
            ingest_pipeline_domain::ChunkSizeStrategy::ByRecords(n) => ChunkSize::Records(n),
            ingest_pipeline_domain::ChunkSizeStrategy::ByMemoryBytes(n) => ChunkSize::MemoryBytes(n),
        };
        let mut assembler = ChunkAssembler::new(chunk_size);

        loop {
            let ready = match source.next_record().await? {
                Some(r) => assembler.push(r),
                None => {
                    let tail = assembler.flush();
                    if let Some(records) = tail {
                        self.push_chunk(ingestion_id, request, &mut last_chunk, &mut total_records, records, true)
                            .await?;
                    }
                    break;
                }
            };

            if let Some(records) = ready {
                self.push_chunk(ingestion_id, request, &mut last_chunk, &mut total_records, records, false)
                    .await?;
            }
        }

        let chunks_pushed = (last_chunk + 1) as u64;
        let outcome = self
            .pusher
            .push_completion(&request.callback_url, &ingestion_id, chunks_pushed, total_records as u64)
            .await?;

        if outcome.acked {
            self.state_store.mark_completed(ingestion_id).await?;
        }

        Ok(IngestionOutcome {
            ingestion_id,
            chunks_pushed,
            total_records: total_records as u64,
        })
    }

    /// Stamps, pushes, and durably commits one chunk. Commits `last_chunk`
    /// and `total_records` to the state store only after the pusher reports
    /// the chunk was acknowledged.
    #[allow(clippy::too_many_arguments)]
    async fn push_chunk(
        &self,
        ingestion_id: IngestionId,
        request: &IngestionRequest,
        last_chunk: &mut i64,
        total_records: &mut i64,
        records: Vec<ingest_pipeline_domain::Record>,
        is_last: bool,
    ) -> Result<(), IngestError> {
        let chunk_number = (*last_chunk + 1) as u64;
        let checksum = ChunkIntegrityManager::compute_checksum(&records);
        let chunk_id = ChunkIntegrityManager::build_chunk_id(&ingestion_id, chunk_number);
        let record_count = records.len() as i64;

        let payload = ChunkPayload {
            ingestion_id,
            chunk_number,
            chunk_id,
            checksum,
            records,
            is_last,
        };

        self.pusher.push(&request.callback_url, &payload).await?;

        *last_chunk = chunk_number as i64;
        *total_records += record_count;
        self.state_store
            .update_chunk(ingestion_id, *last_chunk as u64, *total_records as u64)
            .await
    }
}
