// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Presentation Layer
//!
//! The HTTP surfaces built on top of the application layer: the control
//! plane that starts ingestion runs, and a reference receiver that
//! exercises [`ingest_pipeline_domain::ChunkValidator`] for local testing.

pub mod control_plane;
pub mod receiver;
