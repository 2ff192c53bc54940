// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Command-Line Interface
//!
//! Bootstrap-layer CLI parsing with `clap`. Two subcommands: `serve` starts
//! the control plane (and, optionally, the reference receiver for local
//! testing); `ingest` starts a single ingestion run from the command line
//! without going through the HTTP control plane.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "ingest-pipeline", version, about = "Resumable chunked ingestion pipeline")]
pub struct Cli {
    /// Path to a TOML configuration file. Defaults to `config/default.toml`
    /// if present, then environment variables, then built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Runs the control-plane HTTP server.
    Serve {
        /// Also start the bundled reference receiver on `receiver-port`,
        /// useful for local testing without a separate downstream service.
        #[arg(long)]
        with_reference_receiver: bool,

        #[arg(long, default_value_t = 9090)]
        receiver_port: u16,
    },
    /// Runs one ingestion directly, without the HTTP control plane.
    Ingest {
        #[arg(long)]
        file_path: PathBuf,

        #[arg(long, value_parser = ["json", "excel"])]
        file_type: String,

        #[arg(long)]
        callback_url: String,

        #[arg(long, conflicts_with = "chunk_size_memory_bytes")]
        chunk_size_records: Option<u64>,

        #[arg(long, conflicts_with = "chunk_size_records")]
        chunk_size_memory_bytes: Option<u64>,

        #[arg(long)]
        re_ingestion: bool,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
