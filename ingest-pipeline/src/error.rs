// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Errors from the ambient stack (configuration, schema setup, HTTP wiring)
//! that sit outside the domain's own [`ingest_pipeline_domain::IngestError`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database initialization error: {0}")]
    Database(String),

    #[error("server error: {0}")]
    Server(String),
}

impl BootstrapError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn server(msg: impl Into<String>) -> Self {
        Self::Server(msg.into())
    }
}

impl From<sqlx::Error> for BootstrapError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
