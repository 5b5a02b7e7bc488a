//! # midday-jobs
//!
//! Background jobs for Midday's bank sync.
//!
//! The heart of the crate is [`BoundedBatchProcessor`]: it splits a large
//! sequence of work items into fixed-size chunks and runs an async handler
//! on one chunk at a time, so a provider returning thousands of
//! transactions never turns into thousands of concurrent writes.
//!
//! ```rust
//! use midday_jobs::process_promises_batch;
//! use std::num::NonZeroUsize;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), String> {
//! let batch_size = NonZeroUsize::new(2).unwrap();
//! process_promises_batch(vec![1, 2, 3, 4, 5], batch_size, |batch| async move {
//!     println!("writing {:?}", batch);
//!     Ok::<_, String>(())
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Jobs
//!
//! [`ManualSyncJob`] pulls every transaction for a team's enabled bank
//! accounts and upserts them in batches. Its collaborators (scheduler, data
//! store, providers, cache) are passed in through a [`JobContext`].

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod jobs;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use crate::core::batch::{BoundedBatchProcessor, chunk_count, process_promises_batch};
pub use jobs::{JobContext, ManualSyncJob, ManualSyncPayload, SyncSummary};
pub use utils::error::{JobError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
