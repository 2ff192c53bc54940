// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The two source formats the pipeline can ingest.

use serde::{Deserialize, Serialize};

use crate::error::IngestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Json,
    Excel,
}

impl std::str::FromStr for FileType {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "excel" => Ok(Self::Excel),
            other => Err(IngestError::invalid_request(format!(
                "file_type must be one of [json, excel], got '{other}'"
            ))),
        }
    }
}
