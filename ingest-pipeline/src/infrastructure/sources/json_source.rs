// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # JSON Record Source
//!
//! Reads top-level array elements from a single JSON file, or from every
//! `*.json` file under a directory in deterministic (sorted) order, as one
//! continuous sequence of records. Each file is a single JSON array
//! (`[{...}, {...}]`); `serde_json` has no public API for handing out array
//! elements one at a time off a reader (`StreamDeserializer` parses a
//! sequence of independent root-level values, the NDJSON shape, not elements
//! inside one array), so each file is parsed whole into a `Vec<Record>` and
//! then drained one record at a time. This mirrors `ExcelRecordSource`, which
//! also materializes an intermediate in-memory form (a `calamine` `Range`)
//! while still handing records to callers lazily.

use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ingest_pipeline_domain::{IngestError, Record, RecordSource};
use walkdir::WalkDir;

pub struct JsonRecordSource {
    remaining_files: VecDeque<PathBuf>,
    buffered: VecDeque<Record>,
}

impl JsonRecordSource {
    /// Opens `path`. If it is a directory, every `*.json` file beneath it
    /// (recursive) is enumerated in sorted order and treated as one
    /// continuous sequence; otherwise `path` is treated as a single file.
    pub fn open(path: &Path) -> Result<Self, IngestError> {
        let mut files: Vec<PathBuf> = if path.is_dir() {
            WalkDir::new(path)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
                .collect()
        } else {
            vec![path.to_path_buf()]
        };
        files.sort();

        Ok(Self {
            remaining_files: files.into(),
            buffered: VecDeque::new(),
        })
    }

    fn load_next_file(&mut self) -> Result<bool, IngestError> {
        let Some(path) = self.remaining_files.pop_front() else {
            return Ok(false);
        };
        let file = File::open(&path)
            .map_err(|e| IngestError::source_read(format!("opening {}: {e}", path.display())))?;
        let reader = BufReader::new(file);
        let records: Vec<Record> = serde_json::from_reader(reader)
            .map_err(|e| IngestError::source_read(format!("parsing {}: {e}", path.display())))?;
        self.buffered = records.into();
        Ok(true)
    }
}

#[async_trait]
impl RecordSource for JsonRecordSource {
    async fn next_record(&mut self) -> Result<Option<Record>, IngestError> {
        loop {
            if let Some(record) = self.buffered.pop_front() {
                return Ok(Some(record));
            }
            if !self.load_next_file()? {
                return Ok(None);
            }
        }
    }
}
