// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Chunk Integrity Manager
//!
//! Pure, stateless derivation of chunk identity and checksum. Both the
//! sender and the receiver call [`ChunkIntegrityManager::compute_checksum`]
//! independently and must arrive at byte-identical digests, so the
//! canonicalization rule (sorted object keys at every nesting level, compact
//! JSON, no extraneous whitespace) is the contract this type exists to
//! enforce.
//!
//! ## Architecture Note
//!
//! Following the same domain-service convention as checksum services in
//! comparable pipelines, this type is synchronous: hashing is CPU-bound and
//! gains nothing from async I/O. Infrastructure may wrap it in
//! `spawn_blocking` if a caller needs to keep a hot async task off the
//! hashing work, but the domain contract itself stays sync.

use sha2::{Digest, Sha256};

use crate::value_objects::{IngestionId, Record};

pub struct ChunkIntegrityManager;

impl ChunkIntegrityManager {
    /// SHA-256 over the canonical byte serialization of `records`, where
    /// object keys are sorted lexicographically at every nesting level.
    ///
    /// `Record` already serializes as a JSON object; `serde_json::to_value`
    /// followed by `serde_json::to_vec` on a `BTreeMap`-backed re-encoding
    /// guarantees sorted keys regardless of the `IndexMap` insertion order
    /// `Record` preserves for the wire payload itself.
    pub fn compute_checksum(records: &[Record]) -> String {
        let canonical = Self::canonicalize(records);
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        hex::encode(hasher.finalize())
    }

    /// `f"{ingestion_id}:{chunk_number}"`. No delimiter escaping is needed
    /// because `ingestion_id` is a UUID and never contains `:`.
    pub fn build_chunk_id(ingestion_id: &IngestionId, chunk_number: u64) -> String {
        format!("{ingestion_id}:{chunk_number}")
    }

    /// Re-encodes `records` through a key-sorted intermediate value so the
    /// resulting bytes are identical across platforms and across the
    /// sender/receiver boundary.
    fn canonicalize(records: &[Record]) -> Vec<u8> {
        let sorted: Vec<serde_json::Value> = records
            .iter()
            .map(|r| Self::sort_keys(serde_json::to_value(r).expect("Record always serializes")))
            .collect();
        serde_json::to_vec(&sorted).expect("sorted Value always serializes")
    }

    fn sort_keys(value: serde_json::Value) -> serde_json::Value {
        match value {
            serde_json::Value::Object(map) => {
                let sorted: std::collections::BTreeMap<String, serde_json::Value> =
                    map.into_iter().map(|(k, v)| (k, Self::sort_keys(v))).collect();
                serde_json::to_value(sorted).expect("BTreeMap of Values always serializes")
            }
            serde_json::Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Self::sort_keys).collect())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::RecordValue;

    fn record(pairs: &[(&str, RecordValue)]) -> Record {
        pairs.iter().cloned().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn checksum_is_independent_of_field_insertion_order() {
        let a = record(&[("id", RecordValue::Number(1.0)), ("name", RecordValue::String("x".into()))]);
        let b = record(&[("name", RecordValue::String("x".into())), ("id", RecordValue::Number(1.0))]);

        assert_eq!(
            ChunkIntegrityManager::compute_checksum(&[a]),
            ChunkIntegrityManager::compute_checksum(&[b])
        );
    }

    #[test]
    fn checksum_changes_with_content() {
        let a = record(&[("id", RecordValue::Number(1.0))]);
        let b = record(&[("id", RecordValue::Number(2.0))]);
        assert_ne!(
            ChunkIntegrityManager::compute_checksum(&[a]),
            ChunkIntegrityManager::compute_checksum(&[b])
        );
    }

    #[test]
    fn chunk_id_has_no_escaping() {
        let id = IngestionId::new();
        let chunk_id = ChunkIntegrityManager::build_chunk_id(&id, 7);
        assert_eq!(chunk_id, format!("{id}:7"));
    }
}
