// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Excel Record Source
//!
//! Opens the active sheet in `calamine`'s read-only mode. The first
//! non-empty row is the header: cell values are trimmed, empty cells are
//! named `column_{i}`. Rows beyond it are yielded as records; cells past the
//! header width are dropped, and missing trailing cells become `Null`. A row
//! where every cell is empty is skipped and never counted.
//!
//! `calamine` materializes a worksheet's `Range` up front rather than
//! streaming it cell-by-cell off the zip stream the way `openpyxl`'s
//! `read_only=True` does - this is the closest equivalent available in the
//! Rust ecosystem (see DESIGN.md). Record production to callers is still
//! lazy: rows are handed out one at a time from an iterator over that
//! range. Unlike the JSON source, directories are not supported here -
//! an Excel ingestion always names a single workbook file.

use std::path::Path;

use async_trait::async_trait;
use calamine::{open_workbook_auto, Data, Range, Reader};
use ingest_pipeline_domain::{IngestError, Record, RecordSource, RecordValue};

pub struct ExcelRecordSource {
    headers: Vec<String>,
    rows: std::vec::IntoIter<Vec<Data>>,
}

impl ExcelRecordSource {
    pub fn open(path: &Path) -> Result<Self, IngestError> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| IngestError::source_read(format!("opening workbook {}: {e}", path.display())))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| IngestError::source_read("workbook has no sheets"))?;

        let range: Range<Data> = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| IngestError::source_read(format!("reading sheet '{sheet_name}': {e}")))?;

        let mut rows = range.rows();
        let header_row = rows
            .find(|row| !row_is_empty(row))
            .ok_or_else(|| IngestError::source_read("sheet has no non-empty header row"))?;

        let headers: Vec<String> = header_row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let trimmed = cell_to_string(cell).trim().to_string();
                if trimmed.is_empty() {
                    format!("column_{i}")
                } else {
                    trimmed
                }
            })
            .collect();

        // `Range::rows()` borrows from `range`; collect owned rows so the
        // iterator can outlive this constructor.
        let owned_rows: Vec<Vec<Data>> = rows.map(|row| row.to_vec()).collect();

        Ok(Self {
            headers,
            rows: owned_rows.into_iter(),
        })
    }
}

fn row_is_empty(row: &[Data]) -> bool {
    row.iter().all(|cell| matches!(cell, Data::Empty))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}

fn cell_to_value(cell: &Data) -> RecordValue {
    match cell {
        Data::String(s) => RecordValue::String(s.clone()),
        Data::Float(f) => RecordValue::Number(*f),
        Data::Int(i) => RecordValue::Number(*i as f64),
        Data::Bool(b) => RecordValue::Bool(*b),
        Data::DateTime(dt) => RecordValue::String(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => RecordValue::String(s.clone()),
        Data::Error(e) => RecordValue::String(format!("{e:?}")),
        Data::Empty => RecordValue::Null,
    }
}

#[async_trait]
impl RecordSource for ExcelRecordSource {
    async fn next_record(&mut self) -> Result<Option<Record>, IngestError> {
        for row in self.rows.by_ref() {
            if row_is_empty(&row) {
                continue;
            }

            let mut record = Record::new();
            for (i, header) in self.headers.iter().enumerate() {
                let value = row.get(i).map(cell_to_value).unwrap_or(RecordValue::Null);
                record.insert(header.clone(), value);
            }
            return Ok(Some(record));
        }
        Ok(None)
    }
}
