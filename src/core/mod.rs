//! Core functionality
//!
//! The bounded batch processor, the domain models it carries during a sync
//! and the provider seam transactions come from.

pub mod batch;
pub mod models;
pub mod providers;

pub use batch::{BoundedBatchProcessor, chunk_count, process_promises_batch};
