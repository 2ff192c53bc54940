// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Record
//!
//! A single row produced by a [`crate::repositories::RecordSource`]: an
//! ordered mapping from column name to value. Column order is derived from
//! the source header row and preserved so that a chunk's canonical,
//! key-sorted serialization for checksum purposes is computed from a
//! deterministic value regardless of source iteration order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single cell value. JSON's four non-container scalar kinds, plus
/// `String` for text - numbers are kept as `f64` since the wire format is
/// JSON and this system performs no arithmetic on record values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordValue {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl From<&str> for RecordValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for RecordValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for RecordValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for RecordValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// An ordered column-name -> value mapping, one per source row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, RecordValue>);

impl Record {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn insert(&mut self, column: impl Into<String>, value: RecordValue) {
        self.0.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&RecordValue> {
        self.0.get(column)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RecordValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, RecordValue)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, RecordValue)>>(iter: T) -> Self {
        Self(IndexMap::from_iter(iter))
    }
}
