// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Application Commands
//!
//! Validated command objects that cross the control-plane boundary into the
//! application layer. A command is built once from an HTTP request body and
//! handed, immutable, to [`crate::application::services::IngestionPipeline`].

use std::path::PathBuf;

use ingest_pipeline_domain::{FileType, IngestError, IngestionRequest};
use serde::Deserialize;

/// Wire shape of a `POST /api/ingest` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct StartIngestionCommand {
    pub file_path: PathBuf,
    pub file_type: String,
    pub callback_url: String,
    #[serde(default)]
    pub chunk_size_by_records: Option<u64>,
    #[serde(default)]
    pub chunk_size_by_memory: Option<u64>,
    #[serde(default)]
    pub re_ingestion: bool,
}

impl StartIngestionCommand {
    /// Validates and converts this command into a domain [`IngestionRequest`].
    pub fn into_request(self) -> Result<IngestionRequest, IngestError> {
        let file_type: FileType = self.file_type.parse()?;
        IngestionRequest::new(
            self.file_path,
            file_type,
            self.callback_url,
            self.chunk_size_by_records,
            self.chunk_size_by_memory,
            self.re_ingestion,
        )
    }
}
