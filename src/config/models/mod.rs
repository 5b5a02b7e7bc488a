//! Configuration data models

#![allow(missing_docs)]

pub mod logging;
pub mod sync;

pub use logging::*;
pub use sync::*;

/// Transactions written per upsert
pub fn default_batch_limit() -> usize {
    300
}

/// Period of the per-team background sync in seconds
pub fn default_schedule_interval_secs() -> u64 {
    3600
}

/// Default log level directive
pub fn default_log_level() -> String {
    "info".to_string()
}
