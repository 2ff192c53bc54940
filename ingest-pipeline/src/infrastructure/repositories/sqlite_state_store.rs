// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # SQLite-backed Ingestion State Store
//!
//! Implements `IngestionStateStore` on a single-file SQLite database. A
//! single writer per ingestion ID is assumed; the pool itself tolerates
//! concurrent readers/writers across distinct ingestion IDs since each row
//! is updated through an atomic upsert.

use async_trait::async_trait;
use chrono::Utc;
use ingest_pipeline_domain::{IngestError, IngestionId, IngestionStateStore};
use sqlx::SqlitePool;
use tracing::instrument;

pub struct SqliteStateStore {
    pool: SqlitePool,
}

impl SqliteStateStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IngestionStateStore for SqliteStateStore {
    #[instrument(skip(self))]
    async fn get_last_chunk(&self, id: IngestionId) -> Result<i64, IngestError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT last_chunk FROM ingestion_state WHERE ingestion_id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| IngestError::state_store(e.to_string()))?;
        Ok(row.map(|(v,)| v).unwrap_or(-1))
    }

    #[instrument(skip(self))]
    async fn get_total_records(&self, id: IngestionId) -> Result<i64, IngestError> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT total_records FROM ingestion_state WHERE ingestion_id = ?")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| IngestError::state_store(e.to_string()))?;
        Ok(row.map(|(v,)| v).unwrap_or(0))
    }

    #[instrument(skip(self))]
    async fn update_chunk(&self, id: IngestionId, chunk_number: u64, total_records: u64) -> Result<(), IngestError> {
        sqlx::query(
            "INSERT INTO ingestion_state (ingestion_id, last_chunk, total_records, status, updated_at)
             VALUES (?, ?, ?, 'IN_PROGRESS', ?)
             ON CONFLICT(ingestion_id) DO UPDATE SET
                last_chunk = excluded.last_chunk,
                total_records = excluded.total_records,
                updated_at = excluded.updated_at",
        )
        .bind(id.to_string())
        .bind(chunk_number as i64)
        .bind(total_records as i64)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| IngestError::state_store(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_completed(&self, id: IngestionId) -> Result<(), IngestError> {
        sqlx::query("UPDATE ingestion_state SET status = 'COMPLETED', updated_at = ? WHERE ingestion_id = ?")
            .bind(Utc::now().to_rfc3339())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| IngestError::state_store(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn reset(&self, id: IngestionId) -> Result<(), IngestError> {
        sqlx::query("DELETE FROM ingestion_state WHERE ingestion_id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| IngestError::state_store(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn is_completed(&self, id: IngestionId) -> Result<bool, IngestError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT status FROM ingestion_state WHERE ingestion_id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| IngestError::state_store(e.to_string()))?;
        Ok(row.map(|(s,)| s == "COMPLETED").unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::schema::initialize_database;
    use tempfile::NamedTempFile;

    async fn store() -> SqliteStateStore {
        let temp = NamedTempFile::new().unwrap();
        let db_url = format!("sqlite://{}", temp.path().to_str().unwrap());
        drop(temp);
        let pool = initialize_database(&db_url).await.unwrap();
        SqliteStateStore::new(pool)
    }

    #[tokio::test]
    async fn absent_ingestion_reports_defaults() {
        let store = store().await;
        let id = IngestionId::new();
        assert_eq!(store.get_last_chunk(id).await.unwrap(), -1);
        assert_eq!(store.get_total_records(id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_chunk_persists_progress() {
        let store = store().await;
        let id = IngestionId::new();
        store.update_chunk(id, 0, 10).await.unwrap();
        store.update_chunk(id, 1, 20).await.unwrap();

        assert_eq!(store.get_last_chunk(id).await.unwrap(), 1);
        assert_eq!(store.get_total_records(id).await.unwrap(), 20);
    }

    #[tokio::test]
    async fn mark_completed_then_reset() {
        let store = store().await;
        let id = IngestionId::new();
        store.update_chunk(id, 0, 5).await.unwrap();
        store.mark_completed(id).await.unwrap();
        assert!(store.is_completed(id).await.unwrap());

        store.reset(id).await.unwrap();
        assert!(!store.is_completed(id).await.unwrap());
        assert_eq!(store.get_last_chunk(id).await.unwrap(), -1);
    }
}
