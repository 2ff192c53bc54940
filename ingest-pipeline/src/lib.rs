// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Ingest Pipeline
//!
//! Application and infrastructure layers for the resumable chunked
//! ingestion pipeline: the [`application::services::IngestionPipeline`]
//! orchestrator, its HTTP/SQLite/file-source adapters, and the control-plane
//! and reference-receiver HTTP surfaces built on top of them.

pub mod application;
pub mod error;
pub mod infrastructure;
pub mod presentation;

pub use error::BootstrapError;
