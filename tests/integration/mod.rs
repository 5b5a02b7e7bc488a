//! Integration tests for midday-jobs
//!
//! These tests exercise the public API end to end with in-memory
//! collaborators.

pub mod batch_processor_tests;
pub mod manual_sync_tests;
