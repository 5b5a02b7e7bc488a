//! Transaction sync configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::time::Duration;

/// Transaction sync configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Maximum transactions per upsert batch
    #[serde(default = "default_batch_limit")]
    pub batch_limit: usize,
    /// Interval of the recurring per-team sync in seconds
    #[serde(default = "default_schedule_interval_secs")]
    pub schedule_interval_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            batch_limit: default_batch_limit(),
            schedule_interval_secs: default_schedule_interval_secs(),
        }
    }
}

impl SyncConfig {
    /// Batch limit as a chunk size; `None` when misconfigured as zero
    pub fn batch_size(&self) -> Option<NonZeroUsize> {
        NonZeroUsize::new(self.batch_limit)
    }

    pub fn schedule_interval(&self) -> Duration {
        Duration::from_secs(self.schedule_interval_secs)
    }
}
