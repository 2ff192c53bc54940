// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Control Plane
//!
//! Thin HTTP surface that starts ingestion runs. `POST /api/ingest` builds a
//! domain [`IngestionRequest`] from the request body, opens the matching
//! [`RecordSource`], and spawns [`IngestionPipeline::run`] in the background
//! so the request returns immediately with the minted ingestion ID rather
//! than blocking on a potentially long-running ingestion.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use ingest_pipeline_domain::{FileType, IngestionId};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::application::commands::StartIngestionCommand;
use crate::application::services::IngestionPipeline;
use crate::error::BootstrapError;
use crate::infrastructure::sources::{ExcelRecordSource, JsonRecordSource};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<IngestionPipeline>,
}

#[derive(Debug, Serialize)]
pub struct StartIngestionResponse {
    pub status: &'static str,
    pub ingestion_id: IngestionId,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/ingest", post(start_ingestion))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves until `shutdown` resolves, then drains in-flight requests before
/// returning.
pub async fn serve(
    addr: SocketAddr,
    state: AppState,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<(), BootstrapError> {
    let app = router(state);
    info!(%addr, "control plane listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| BootstrapError::server(e.to_string()))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| BootstrapError::server(e.to_string()))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn start_ingestion(
    State(state): State<AppState>,
    Json(command): Json<StartIngestionCommand>,
) -> Result<Json<StartIngestionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request = command.into_request().map_err(|e| bad_request(e.to_string()))?;

    let source: Box<dyn ingest_pipeline_domain::RecordSource> = match request.file_type {
        FileType::Json => Box::new(
            JsonRecordSource::open(&request.file_path).map_err(|e| bad_request(e.to_string()))?,
        ),
        FileType::Excel => Box::new(
            ExcelRecordSource::open(&request.file_path).map_err(|e| bad_request(e.to_string()))?,
        ),
    };

    let ingestion_id = IngestionId::new();
    let pipeline = Arc::clone(&state.pipeline);

    tokio::spawn(async move {
        if let Err(e) = pipeline.run(ingestion_id, &request, source).await {
            error!(%ingestion_id, error = %e, "ingestion run failed");
        }
    });

    Ok(Json(StartIngestionResponse { status: "STARTED", ingestion_id }))
}

fn bad_request(message: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message }))
}
