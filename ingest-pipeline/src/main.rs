// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Entry point. Parses the CLI, wires the composition root, and dispatches
//! to either the `serve` or `ingest` command.

use std::net::SocketAddr;
use std::sync::Arc;

use ingest_pipeline::application::commands::StartIngestionCommand;
use ingest_pipeline::application::services::IngestionPipeline;
use ingest_pipeline::infrastructure::config::AppConfig;
use ingest_pipeline::infrastructure::http::HttpChunkPusher;
use ingest_pipeline::infrastructure::logging::init_tracing;
use ingest_pipeline::infrastructure::repositories::schema::initialize_database;
use ingest_pipeline::infrastructure::repositories::SqliteStateStore;
use ingest_pipeline::infrastructure::sources::{ExcelRecordSource, JsonRecordSource};
use ingest_pipeline::presentation::{control_plane, receiver};
use ingest_pipeline_bootstrap::cli::{self, Commands};
use ingest_pipeline_bootstrap::logger::{BootstrapLogger, ConsoleLogger};
use ingest_pipeline_bootstrap::shutdown::ShutdownCoordinator;
use ingest_pipeline_domain::{FileType, IngestionId, RecordSource};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bootstrap_logger = ConsoleLogger::new();
    bootstrap_logger.info("parsing command line");
    let cli = cli::parse();

    bootstrap_logger.info("loading configuration");
    let config = AppConfig::load(cli.config.clone())?;
    init_tracing(&config.log_level);

    let pool = initialize_database(&config.database.url).await?;
    let state_store = Arc::new(SqliteStateStore::new(pool));
    let pusher = Arc::new(HttpChunkPusher::new(&config.pusher));
    let pipeline = Arc::new(IngestionPipeline::new(state_store, pusher));

    match cli.command {
        Commands::Serve {
            with_reference_receiver,
            receiver_port,
        } => {
            let coordinator = ShutdownCoordinator::default();

            let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
            let app_state = control_plane::AppState { pipeline };
            let token = coordinator.token();
            let serve_handle = tokio::spawn(control_plane::serve(addr, app_state, async move {
                token.cancelled().await
            }));

            let receiver_handle = if with_reference_receiver {
                let receiver_addr = SocketAddr::new(config.server.host.parse()?, receiver_port);
                let receiver_state = receiver::ReceiverState::default();
                let token = coordinator.token();
                Some(tokio::spawn(receiver::serve(receiver_addr, receiver_state, async move {
                    token.cancelled().await
                })))
            } else {
                None
            };

            tokio::signal::ctrl_c().await?;
            info!("received interrupt signal");
            coordinator.initiate_shutdown();

            if let Err(e) = serve_handle.await? {
                error!(error = %e, "control plane exited with error");
            }
            if let Some(handle) = receiver_handle {
                if let Err(e) = handle.await? {
                    error!(error = %e, "reference receiver exited with error");
                }
            }
        }
        Commands::Ingest {
            file_path,
            file_type,
            callback_url,
            chunk_size_records,
            chunk_size_memory_bytes,
            re_ingestion,
        } => {
            let command = StartIngestionCommand {
                file_path,
                file_type,
                callback_url,
                chunk_size_by_records: chunk_size_records,
                chunk_size_by_memory: chunk_size_memory_bytes,
                re_ingestion,
            };
            let request = command.into_request()?;

            let source: Box<dyn RecordSource> = match request.file_type {
                FileType::Json => Box::new(JsonRecordSource::open(&request.file_path)?),
                FileType::Excel => Box::new(ExcelRecordSource::open(&request.file_path)?),
            };

            let ingestion_id = IngestionId::new();
            let outcome = pipeline.run(ingestion_id, &request, source).await?;
            info!(
                ingestion_id = %outcome.ingestion_id,
                chunks_pushed = outcome.chunks_pushed,
                total_records = outcome.total_records,
                "ingestion complete"
            );
        }
    }

    Ok(())
}
