// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Reference Receiver
//!
//! A minimal HTTP endpoint that accepts `ChunkPayload`s pushed by a
//! `ChunkPusher` and runs them through [`ChunkValidator`], replying with the
//! ACK/NACK shape [`crate::infrastructure::http::HttpChunkPusher`] expects.
//! This is a reference implementation for local testing and the bundled
//! integration tests - a real receiver lives in whatever system is consuming
//! the ingested records.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use ingest_pipeline_domain::{ChunkPayload, ChunkValidator, ValidationOutcome};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::BootstrapError;

#[derive(Clone)]
pub struct ReceiverState {
    pub validator: Arc<ChunkValidator>,
}

impl Default for ReceiverState {
    fn default() -> Self {
        Self {
            validator: Arc::new(ChunkValidator::new()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub ack: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Wire shape of the completion notification `ChunkPusher::push_completion`
/// sends. Any completion notification for a known ingestion is acknowledged.
#[derive(Debug, Deserialize)]
pub struct CompletionNotification {
    #[allow(dead_code)]
    pub ingestion_id: ingest_pipeline_domain::IngestionId,
    pub status: String,
    #[allow(dead_code)]
    pub chunk_number: u64,
    #[allow(dead_code)]
    pub total_records: u64,
}

pub fn router(state: ReceiverState) -> Router {
    Router::new()
        .route("/callback", post(receive_chunk_or_completion))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(
    addr: SocketAddr,
    state: ReceiverState,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<(), BootstrapError> {
    let app = router(state);
    info!(%addr, "reference receiver listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| BootstrapError::server(e.to_string()))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| BootstrapError::server(e.to_string()))
}

/// A completion notification and a chunk payload share the `/callback` route
/// since both arrive as the pushed body of a POST from the same pusher; the
/// presence of `status` distinguishes the former.
async fn receive_chunk_or_completion(
    State(state): State<ReceiverState>,
    body: axum::body::Bytes,
) -> Json<AckResponse> {
    if let Ok(completion) = serde_json::from_slice::<CompletionNotification>(&body) {
        info!(status = %completion.status, "received completion notification");
        return Json(AckResponse { ack: true, error: None });
    }

    match serde_json::from_slice::<ChunkPayload>(&body) {
        Ok(chunk) => match state.validator.validate(&chunk) {
            ValidationOutcome::Ack => Json(AckResponse { ack: true, error: None }),
            ValidationOutcome::Nack(code) => Json(AckResponse {
                ack: false,
                error: Some(code.to_string()),
            }),
        },
        Err(e) => Json(AckResponse {
            ack: false,
            error: Some(format!("malformed chunk payload: {e}")),
        }),
    }
}
