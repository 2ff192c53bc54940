//! Integration Tests
//!
//! This module aggregates all integration tests for the ingest pipeline.

#[path = "integration/end_to_end_test.rs"]
mod end_to_end_test;
