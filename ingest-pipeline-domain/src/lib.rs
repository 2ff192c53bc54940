// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Ingest Pipeline Domain
//!
//! Pure, reusable business logic for the resumable chunked ingestion
//! pipeline: value objects, entities, stateless domain services, and the
//! async infrastructure ports the application layer implements.
//!
//! ## Architecture
//!
//! ```text
//! RecordSource -> ChunkAssembler -> (stamped ChunkPayload) -> ChunkPusher
//!                                                                  |
//!                                                                  v
//!                                            receiver's ChunkValidator -> ACK
//!                                                                  |
//!                                                                  v
//!                                                    IngestionStateStore commit
//! ```
//!
//! `ChunkIntegrityManager`, `ChunkAssembler`, and `ChunkValidator` are pure
//! and synchronous. `RecordSource`, `ChunkPusher`, and `IngestionStateStore`
//! are async ports implemented by infrastructure.

pub mod entities;
pub mod error;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use error::IngestError;
pub use value_objects::{ChunkPayload, ChunkSizeStrategy, FileType, IngestionId, IngestionRequest, Record, RecordValue};
pub use entities::{IngestionState, IngestionStatus};
pub use repositories::{ChunkPusher, IngestionStateStore, PushOutcome, RecordSource};
pub use services::{ChunkAssembler, ChunkIntegrityManager, ChunkSize, ChunkValidator, ValidationOutcome};
