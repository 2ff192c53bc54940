// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Infrastructure Logging
//!
//! Installs a global `tracing` subscriber: human-readable for a terminal,
//! structured otherwise. The level is driven by `AppConfig::log_level`
//! unless `RUST_LOG` is set, in which case `RUST_LOG` wins.

use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the global tracing subscriber. Safe to call once at process
/// start; a second call is a programmer error and panics, matching
/// `tracing`'s own `set_global_default` contract.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .try_init()
        .expect("tracing subscriber already initialized");
}
