// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # HTTP Chunk Pusher
//!
//! POSTs a chunk payload to `callback_url` and translates the receiver's
//! ACK/NACK response. Retries immediately (no backoff) up to `max_attempts`
//! total before surfacing a final `IngestError`. Timeout and retry count come
//! from [`crate::infrastructure::config::PusherSettings`].

use std::time::Duration;

use async_trait::async_trait;
use ingest_pipeline_domain::{ChunkPayload, ChunkPusher, IngestError, IngestionId, PushOutcome};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::infrastructure::config::PusherSettings;

#[derive(Debug, Deserialize)]
struct AckResponse {
    ack: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct CompletionNotification<'a> {
    ingestion_id: &'a IngestionId,
    status: &'static str,
    chunk_number: u64,
    total_records: u64,
}

pub struct HttpChunkPusher {
    client: reqwest::Client,
    max_attempts: u32,
}

impl HttpChunkPusher {
    pub fn new(settings: &PusherSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .expect("reqwest client configuration is valid");
        Self {
            client,
            max_attempts: settings.max_attempts,
        }
    }

    async fn post_and_parse_ack(&self, url: &str, body: impl Serialize) -> Result<AckResponse, IngestError> {
        let resp = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| IngestError::transport(e.to_string()))?;

        resp.json::<AckResponse>()
            .await
            .map_err(|e| IngestError::transport(format!("malformed ACK response: {e}")))
    }
}

impl Default for HttpChunkPusher {
    fn default() -> Self {
        Self::new(&PusherSettings::default())
    }
}

#[async_trait]
impl ChunkPusher for HttpChunkPusher {
    async fn push(&self, callback_url: &str, chunk: &ChunkPayload) -> Result<(), IngestError> {
        let mut last_err = None;

        for attempt in 1..=self.max_attempts {
            debug!(chunk_number = chunk.chunk_number, attempt, "pushing chunk");

            match self.post_and_parse_ack(callback_url, chunk).await {
                Ok(AckResponse { ack: true, .. }) => return Ok(()),
                Ok(AckResponse { ack: false, error }) => {
                    let code = error.unwrap_or_else(|| "UNKNOWN".to_string());
                    warn!(chunk_number = chunk.chunk_number, attempt, code = %code, "chunk nacked");
                    last_err = Some(IngestError::nack(chunk.chunk_number, code));
                }
                Err(e) => {
                    warn!(chunk_number = chunk.chunk_number, attempt, error = %e, "push failed");
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| IngestError::transport("exhausted retries with no recorded error")))
    }

    async fn push_completion(
        &self,
        callback_url: &str,
        ingestion_id: &IngestionId,
        chunk_number: u64,
        total_records: u64,
    ) -> Result<PushOutcome, IngestError> {
        let notification = CompletionNotification {
            ingestion_id,
            status: "COMPLETED",
            chunk_number,
            total_records,
        };

        let ack = self.post_and_parse_ack(callback_url, &notification).await?;
        Ok(PushOutcome { acked: ack.ack })
    }
}
