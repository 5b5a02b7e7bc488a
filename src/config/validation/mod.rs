//! Configuration validation

use super::models::{LoggingConfig, SyncConfig};
use tracing_subscriber::EnvFilter;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Upper bound on a single upsert batch
pub const MAX_BATCH_LIMIT: usize = 10_000;

impl Validate for SyncConfig {
    fn validate(&self) -> Result<(), String> {
        if self.batch_limit == 0 {
            return Err("batch_limit must be at least 1".to_string());
        }
        if self.batch_limit > MAX_BATCH_LIMIT {
            return Err(format!("batch_limit must not exceed {}", MAX_BATCH_LIMIT));
        }
        if self.schedule_interval_secs == 0 {
            return Err("schedule_interval_secs must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| format!("invalid log level '{}': {}", self.level, e))
    }
}
