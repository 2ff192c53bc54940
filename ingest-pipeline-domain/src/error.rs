// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Error System
//!
//! Error taxonomy for the ingestion pipeline domain. Each variant maps to one
//! row of the error-handling table in the design notes: validation failures
//! surface synchronously, push/state-store failures are retried a bounded
//! number of times by the caller, and everything else terminates the
//! ingestion while leaving durable state untouched.

use thiserror::Error;

/// Domain-specific errors for the ingestion pipeline.
#[derive(Error, Debug, Clone)]
pub enum IngestError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("source read error: {0}")]
    SourceRead(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("chunk {chunk_number} rejected: {code}")]
    Nack { chunk_number: u64, code: String },

    #[error("state store error: {0}")]
    StateStore(String),

    #[error("integrity check failed: {0}")]
    Integrity(String),

    #[error("ingestion cancelled: {0}")]
    Cancelled(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IngestError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn source_read(msg: impl Into<String>) -> Self {
        Self::SourceRead(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn nack(chunk_number: u64, code: impl Into<String>) -> Self {
        Self::Nack {
            chunk_number,
            code: code.into(),
        }
    }

    pub fn state_store(msg: impl Into<String>) -> Self {
        Self::StateStore(msg.into())
    }

    /// Whether a caller may reasonably retry the operation that produced
    /// this error. Transport failures and NACKs are retryable by
    /// `ChunkPusher`; everything else is not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Nack { .. })
    }
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        Self::SourceRead(err.to_string())
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        Self::SourceRead(err.to_string())
    }
}
