// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Ingestion Request
//!
//! Immutable input to the pipeline. Self-validating: constructing one that
//! violates an invariant (both or neither chunk-size field set, empty
//! `callback_url`) fails at the boundary instead of letting an invalid value
//! propagate into the pipeline.

use std::path::PathBuf;

use crate::error::IngestError;

use super::FileType;

/// Exactly one of the two chunking strategies a request may specify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkSizeStrategy {
    ByRecords(u64),
    ByMemoryBytes(u64),
}

#[derive(Debug, Clone)]
pub struct IngestionRequest {
    pub file_path: PathBuf,
    pub file_type: FileType,
    pub callback_url: String,
    pub chunk_size: ChunkSizeStrategy,
    pub re_ingestion: bool,
}

impl IngestionRequest {
    /// Builds a request, enforcing that exactly one chunk-size field is set
    /// and that `callback_url` is non-empty.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        file_path: PathBuf,
        file_type: FileType,
        callback_url: String,
        chunk_size_by_records: Option<u64>,
        chunk_size_by_memory: Option<u64>,
        re_ingestion: bool,
    ) -> Result<Self, IngestError> {
        if callback_url.trim().is_empty() {
            return Err(IngestError::invalid_request("callback_url must not be empty"));
        }

        let chunk_size = match (chunk_size_by_records, chunk_size_by_memory) {
            (Some(records), None) if records > 0 => ChunkSizeStrategy::ByRecords(records),
            (None, Some(bytes)) if bytes > 0 => ChunkSizeStrategy::ByMemoryBytes(bytes),
            (Some(_), Some(_)) => {
                return Err(IngestError::invalid_request(
                    "exactly one of chunk_size_by_records or chunk_size_by_memory must be set, got both",
                ))
            }
            (None, None) => {
                return Err(IngestError::invalid_request(
                    "exactly one of chunk_size_by_records or chunk_size_by_memory must be set, got neither",
                ))
            }
            _ => {
                return Err(IngestError::invalid_request(
                    "chunk size fields must be positive integers",
                ))
            }
        };

        Ok(Self {
            file_path,
            file_type,
            callback_url,
            chunk_size,
            re_ingestion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> (PathBuf, FileType, String) {
        (PathBuf::from("/tmp/data.json"), FileType::Json, "http://localhost/cb".to_string())
    }

    #[test]
    fn accepts_records_only() {
        let (path, ty, cb) = base();
        let req = IngestionRequest::new(path, ty, cb, Some(10), None, false).unwrap();
        assert_eq!(req.chunk_size, ChunkSizeStrategy::ByRecords(10));
    }

    #[test]
    fn accepts_memory_only() {
        let (path, ty, cb) = base();
        let req = IngestionRequest::new(path, ty, cb, None, Some(2048), false).unwrap();
        assert_eq!(req.chunk_size, ChunkSizeStrategy::ByMemoryBytes(2048));
    }

    #[test]
    fn rejects_both_set() {
        let (path, ty, cb) = base();
        assert!(IngestionRequest::new(path, ty, cb, Some(10), Some(2048), false).is_err());
    }

    #[test]
    fn rejects_neither_set() {
        let (path, ty, cb) = base();
        assert!(IngestionRequest::new(path, ty, cb, None, None, false).is_err());
    }

    #[test]
    fn rejects_empty_callback() {
        let (path, ty, _) = base();
        assert!(IngestionRequest::new(path, ty, String::new(), Some(10), None, false).is_err());
    }
}
