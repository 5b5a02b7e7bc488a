//! Dashboard cache invalidation
//!
//! Cached dashboard data is tagged per team; a sync marks every tag that
//! depends on transactions as stale.

use crate::utils::error::{JobError, Result};
use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;

/// Cache tag prefixes touched by a transaction sync, in revalidation order
pub const TEAM_TAG_PREFIXES: [&str; 6] = [
    "bank_connections",
    "transactions",
    "spending",
    "metrics",
    "bank_accounts",
    "insights",
];

/// Every cache tag of `team_id` that a sync invalidates
pub fn team_tags(team_id: &str) -> Vec<String> {
    TEAM_TAG_PREFIXES
        .iter()
        .map(|prefix| format!("{}_{}", prefix, team_id))
        .collect()
}

/// Marks cached data as stale
#[async_trait::async_trait]
pub trait CacheInvalidator: Send + Sync {
    async fn revalidate_tag(&self, tag: &str) -> Result<()>;
}

/// Invalidator that only records which tags it was asked to revalidate
#[derive(Debug, Default)]
pub struct RecordingInvalidator {
    tags: Mutex<Vec<String>>,
    failing: RwLock<HashSet<String>>,
}

impl RecordingInvalidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every revalidation of `tag`
    pub fn failing_for(self, tag: impl Into<String>) -> Self {
        self.failing.write().insert(tag.into());
        self
    }

    /// Every tag revalidation was attempted for, rejected ones included
    pub fn tags(&self) -> Vec<String> {
        self.tags.lock().clone()
    }
}

#[async_trait::async_trait]
impl CacheInvalidator for RecordingInvalidator {
    async fn revalidate_tag(&self, tag: &str) -> Result<()> {
        self.tags.lock().push(tag.to_string());

        if self.failing.read().contains(tag) {
            return Err(JobError::internal(format!("cache rejected revalidation of {}", tag)));
        }
        Ok(())
    }
}
