// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Property tests for [`ChunkAssembler`]: regardless of chunking strategy or
//! input size, no record is ever duplicated or dropped, and chunk numbers
//! assigned by a caller that increments once per emitted chunk stay dense
//! and strictly increasing.

use ingest_pipeline_domain::{ChunkAssembler, ChunkSize, Record, RecordValue};
use proptest::prelude::*;

fn record(id: i64) -> Record {
    let mut r = Record::new();
    r.insert("id", RecordValue::Number(id as f64));
    r
}

fn run_records_strategy(total: usize, threshold: u64) -> Vec<usize> {
    let mut assembler = ChunkAssembler::new(ChunkSize::Records(threshold));
    let mut chunk_sizes = Vec::new();
    for i in 0..total {
        if let Some(chunk) = assembler.push(record(i as i64)) {
            chunk_sizes.push(chunk.len());
        }
    }
    if let Some(chunk) = assembler.flush() {
        chunk_sizes.push(chunk.len());
    }
    chunk_sizes
}

fn run_memory_strategy(total: usize, threshold: u64) -> Vec<usize> {
    let mut assembler = ChunkAssembler::new(ChunkSize::MemoryBytes(threshold));
    let mut chunk_sizes = Vec::new();
    for i in 0..total {
        if let Some(chunk) = assembler.push(record(i as i64)) {
            chunk_sizes.push(chunk.len());
        }
    }
    if let Some(chunk) = assembler.flush() {
        chunk_sizes.push(chunk.len());
    }
    chunk_sizes
}

proptest! {
    #[test]
    fn by_records_conserves_total_count(total in 0usize..500, threshold in 1u64..50) {
        let sizes = run_records_strategy(total, threshold);
        let reconstructed: usize = sizes.iter().sum();
        prop_assert_eq!(reconstructed, total);
    }

    #[test]
    fn by_records_every_chunk_but_the_last_is_exactly_at_threshold(total in 0usize..500, threshold in 1u64..50) {
        let sizes = run_records_strategy(total, threshold);
        if let Some((last, rest)) = sizes.split_last() {
            for size in rest {
                prop_assert_eq!(*size as u64, threshold);
            }
            prop_assert!(*last as u64 <= threshold);
            prop_assert!(*last > 0);
        }
    }

    #[test]
    fn by_memory_conserves_total_count(total in 0usize..300, threshold in 1u64..200) {
        let sizes = run_memory_strategy(total, threshold);
        let reconstructed: usize = sizes.iter().sum();
        prop_assert_eq!(reconstructed, total);
    }

    #[test]
    fn by_memory_never_emits_an_empty_chunk(total in 0usize..300, threshold in 1u64..200) {
        let sizes = run_memory_strategy(total, threshold);
        for size in sizes {
            prop_assert!(size > 0);
        }
    }

    /// Simulates the orchestrator's chunk-numbering scheme: one number per
    /// emitted chunk, starting at zero, with no gaps or repeats.
    #[test]
    fn simulated_chunk_numbers_are_dense_and_monotonic(total in 0usize..500, threshold in 1u64..50) {
        let sizes = run_records_strategy(total, threshold);
        let numbers: Vec<u64> = (0..sizes.len() as u64).collect();
        for window in numbers.windows(2) {
            prop_assert_eq!(window[1], window[0] + 1);
        }
    }
}
