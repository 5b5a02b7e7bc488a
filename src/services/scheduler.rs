//! Recurring job scheduler
//!
//! Registers a per-team schedule with an external scheduler service. The
//! service owns timing and durability; this side only names the schedule.

use crate::utils::error::{JobError, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

/// When a registered schedule fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "options", rename_all = "lowercase")]
pub enum ScheduleSpec {
    /// Every `seconds` seconds
    Interval { seconds: u64 },
}

impl ScheduleSpec {
    pub fn every(interval: Duration) -> Self {
        Self::Interval {
            seconds: interval.as_secs(),
        }
    }

    pub fn period(&self) -> Duration {
        match self {
            Self::Interval { seconds } => Duration::from_secs(*seconds),
        }
    }
}

/// Client of the scheduler service
#[async_trait::async_trait]
pub trait Scheduler: Send + Sync {
    /// Create or replace the schedule identified by `key`
    async fn register(&self, key: &str, spec: ScheduleSpec) -> Result<()>;
}

/// Scheduler keeping registrations in memory
#[derive(Debug, Default)]
pub struct InMemoryScheduler {
    schedules: RwLock<HashMap<String, ScheduleSpec>>,
    unavailable: AtomicBool,
}

impl InMemoryScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every registration, as an unreachable service would
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn get(&self, key: &str) -> Option<ScheduleSpec> {
        self.schedules.read().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.schedules.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.read().is_empty()
    }
}

#[async_trait::async_trait]
impl Scheduler for InMemoryScheduler {
    async fn register(&self, key: &str, spec: ScheduleSpec) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(JobError::scheduler(format!("failed to register schedule {}", key)));
        }

        debug!("registered schedule {} every {:?}", key, spec.period());
        self.schedules.write().insert(key.to_string(), spec);
        Ok(())
    }
}
