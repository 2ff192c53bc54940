// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Infrastructure Ports
//!
//! I/O-bound traits the domain depends on but does not implement. These are
//! classified as infrastructure ports rather than domain services - they are
//! async because the work behind them is I/O-bound, not CPU-bound. Concrete
//! implementations live in the `ingest-pipeline` crate.

mod chunk_pusher;
mod record_source;
mod state_store;

pub use chunk_pusher::{ChunkPusher, PushOutcome};
pub use record_source::RecordSource;
pub use state_store::IngestionStateStore;
