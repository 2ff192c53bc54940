// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

mod ingestion_pipeline;

pub use ingestion_pipeline::{IngestionOutcome, IngestionPipeline};
