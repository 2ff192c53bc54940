// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Record Source Port
//!
//! A lazy, restartable producer of records from a file or directory. "Lazy"
//! means the full file is never materialized in memory; "restartable" means
//! the pipeline can re-open a fresh source from the beginning and skip the
//! first N already-processed records on resume, since sources are not
//! themselves seekable at the record level.

use async_trait::async_trait;

use crate::error::IngestError;
use crate::value_objects::Record;

#[async_trait]
pub trait RecordSource: Send {
    /// Pulls the next record, or `None` once the source is exhausted.
    /// Fully-empty rows (Excel) are already filtered out by the time they
    /// reach this method and do not count as produced records.
    async fn next_record(&mut self) -> Result<Option<Record>, IngestError>;
}
