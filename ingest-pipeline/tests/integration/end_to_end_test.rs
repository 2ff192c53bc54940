// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! End-to-end tests driving the real `IngestionPipeline`, `HttpChunkPusher`,
//! and `SqliteStateStore` against the bundled reference receiver (real
//! `ChunkValidator` behind axum), rather than against a stubbed HTTP server.

use std::io::Write as _;
use std::sync::Arc;

use ingest_pipeline::application::services::IngestionPipeline;
use ingest_pipeline::infrastructure::config::PusherSettings;
use ingest_pipeline::infrastructure::http::HttpChunkPusher;
use ingest_pipeline::infrastructure::repositories::schema::initialize_database;
use ingest_pipeline::infrastructure::repositories::SqliteStateStore;
use ingest_pipeline::infrastructure::sources::JsonRecordSource;
use ingest_pipeline::presentation::receiver::{self, ReceiverState};
use ingest_pipeline_domain::{FileType, IngestionId, IngestionRequest, IngestionStateStore, RecordSource};
use tempfile::NamedTempFile;

async fn spawn_receiver(state: ReceiverState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = receiver::router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/callback")
}

async fn state_store() -> SqliteStateStore {
    let temp = NamedTempFile::new().unwrap();
    let db_url = format!("sqlite://{}", temp.path().to_str().unwrap());
    drop(temp);
    let pool = initialize_database(&db_url).await.unwrap();
    SqliteStateStore::new(pool)
}

fn json_file_with_records(count: usize) -> tempfile::TempPath {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let records: Vec<String> = (0..count).map(|i| format!(r#"{{"id": {i}}}"#)).collect();
    write!(file, "[{}]", records.join(",")).unwrap();
    file.into_temp_path()
}

#[tokio::test]
async fn happy_path_by_records_completes_in_three_chunks() {
    let callback_url = spawn_receiver(ReceiverState::default()).await;
    let store = Arc::new(state_store().await);
    let pusher = Arc::new(HttpChunkPusher::new(&PusherSettings::default()));
    let pipeline = IngestionPipeline::new(store.clone(), pusher);

    let path = json_file_with_records(25);
    let request = IngestionRequest::new(
        path.to_path_buf(),
        FileType::Json,
        callback_url,
        Some(10),
        None,
        false,
    )
    .unwrap();

    let ingestion_id = IngestionId::new();
    let source: Box<dyn RecordSource> = Box::new(JsonRecordSource::open(&request.file_path).unwrap());
    let outcome = pipeline.run(ingestion_id, &request, source).await.unwrap();

    assert_eq!(outcome.chunks_pushed, 3);
    assert_eq!(outcome.total_records, 25);
    assert!(store.is_completed(ingestion_id).await.unwrap());
}

#[tokio::test]
async fn resume_after_crash_skips_already_delivered_records() {
    let receiver_state = ReceiverState::default();
    let callback_url = spawn_receiver(receiver_state).await;
    let store = Arc::new(state_store().await);
    let pusher = Arc::new(HttpChunkPusher::new(&PusherSettings::default()));
    let pipeline = IngestionPipeline::new(store.clone(), pusher);

    let path = json_file_with_records(25);
    let request = IngestionRequest::new(
        path.to_path_buf(),
        FileType::Json,
        callback_url,
        Some(10),
        None,
        false,
    )
    .unwrap();
    let ingestion_id = IngestionId::new();

    // Simulate a crash after chunk 1's ACK: seed the state store directly
    // rather than running the pipeline to completion.
    store.update_chunk(ingestion_id, 2, 20).await.unwrap();

    let source: Box<dyn RecordSource> = Box::new(JsonRecordSource::open(&request.file_path).unwrap());
    let outcome = pipeline.run(ingestion_id, &request, source).await.unwrap();

    assert_eq!(outcome.chunks_pushed, 3);
    assert_eq!(outcome.total_records, 25);
}

#[tokio::test]
async fn duplicate_resend_of_same_chunk_is_acked_idempotently() {
    let callback_url = spawn_receiver(ReceiverState::default()).await;
    let store = Arc::new(state_store().await);
    let pusher = HttpChunkPusher::new(&PusherSettings::default());

    let mut record = ingest_pipeline_domain::Record::new();
    record.insert("id", ingest_pipeline_domain::RecordValue::Number(1.0));
    let records = vec![record];
    let checksum = ingest_pipeline_domain::ChunkIntegrityManager::compute_checksum(&records);
    let ingestion_id = IngestionId::new();
    let payload = ingest_pipeline_domain::ChunkPayload {
        chunk_id: ingest_pipeline_domain::ChunkIntegrityManager::build_chunk_id(&ingestion_id, 0),
        ingestion_id,
        chunk_number: 0,
        checksum,
        records,
        is_last: true,
    };

    use ingest_pipeline_domain::ChunkPusher;
    pusher.push(&callback_url, &payload).await.unwrap();
    pusher.push(&callback_url, &payload).await.unwrap();

    let _ = store; // state store unused on this path; the receiver owns duplicate suppression
}

#[tokio::test]
async fn checksum_tampering_exhausts_retries_and_fails() {
    let callback_url = spawn_receiver(ReceiverState::default()).await;
    let pusher = HttpChunkPusher::new(&PusherSettings::default());

    let mut record = ingest_pipeline_domain::Record::new();
    record.insert("id", ingest_pipeline_domain::RecordValue::Number(1.0));
    let records = vec![record];
    let ingestion_id = IngestionId::new();
    let payload = ingest_pipeline_domain::ChunkPayload {
        chunk_id: ingest_pipeline_domain::ChunkIntegrityManager::build_chunk_id(&ingestion_id, 0),
        ingestion_id,
        chunk_number: 0,
        checksum: "deadbeef".to_string(),
        records,
        is_last: true,
    };

    use ingest_pipeline_domain::{ChunkPusher, IngestError};
    let err = pusher.push(&callback_url, &payload).await.unwrap_err();
    assert!(matches!(err, IngestError::Nack { code, .. } if code == "CHECKSUM_MISMATCH"));
}

#[tokio::test]
async fn receiver_restart_mid_stream_nacks_the_next_chunk_as_out_of_order() {
    let callback_url = spawn_receiver(ReceiverState::default()).await;
    let store = Arc::new(state_store().await);
    let pusher = Arc::new(HttpChunkPusher::new(&PusherSettings::default()));
    let pipeline = IngestionPipeline::new(store.clone(), pusher);

    let path = json_file_with_records(15);
    let request = IngestionRequest::new(
        path.to_path_buf(),
        FileType::Json,
        callback_url.clone(),
        Some(10),
        None,
        false,
    )
    .unwrap();
    let ingestion_id = IngestionId::new();

    // Pretend chunk 0 already landed and was ACKed, then the receiver
    // process restarted and lost its in-memory validator state - this
    // sender still believes chunk 1 is next.
    store.update_chunk(ingestion_id, 1, 10).await.unwrap();

    let source: Box<dyn RecordSource> = Box::new(JsonRecordSource::open(&request.file_path).unwrap());
    let err = pipeline.run(ingestion_id, &request, source).await.unwrap_err();

    use ingest_pipeline_domain::IngestError;
    assert!(matches!(err, IngestError::Nack { code, .. } if code == "OUT_OF_ORDER_CHUNK"));
    // State store was not advanced past the seeded value since the push failed.
    assert_eq!(store.get_last_chunk(ingestion_id).await.unwrap(), 1);
}

#[tokio::test]
async fn by_memory_mode_conserves_total_record_count() {
    let callback_url = spawn_receiver(ReceiverState::default()).await;
    let store = Arc::new(state_store().await);
    let pusher = Arc::new(HttpChunkPusher::new(&PusherSettings::default()));
    let pipeline = IngestionPipeline::new(store.clone(), pusher);

    let path = json_file_with_records(100);
    let request = IngestionRequest::new(
        path.to_path_buf(),
        FileType::Json,
        callback_url,
        None,
        Some(2048),
        false,
    )
    .unwrap();
    let ingestion_id = IngestionId::new();

    let source: Box<dyn RecordSource> = Box::new(JsonRecordSource::open(&request.file_path).unwrap());
    let outcome = pipeline.run(ingestion_id, &request, source).await.unwrap();

    assert_eq!(outcome.total_records, 100);
    assert!(store.is_completed(ingestion_id).await.unwrap());
}
