//! Configuration management for background jobs
//!
//! Configuration comes from an optional YAML file, then environment
//! variables on top of it.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{JobError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Overrides `sync.batch_limit`
pub const ENV_BATCH_LIMIT: &str = "MIDDAY_BATCH_LIMIT";
/// Overrides `sync.schedule_interval_secs`
pub const ENV_SCHEDULE_INTERVAL_SECS: &str = "MIDDAY_SCHEDULE_INTERVAL_SECS";
/// Overrides `logging.level`
pub const ENV_LOG_LEVEL: &str = "MIDDAY_LOG_LEVEL";
/// Overrides `logging.json`
pub const ENV_LOG_JSON: &str = "MIDDAY_LOG_JSON";

/// Main configuration struct for background jobs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Transaction sync settings
    #[serde(default)]
    pub sync: SyncConfig,
    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| JobError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| JobError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        let _ = dotenvy::dotenv();

        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Layer environment variables over an already loaded configuration
    pub fn with_env_overrides(mut self) -> Result<Self> {
        let _ = dotenvy::dotenv();
        self.apply_overrides(|key| std::env::var(key).ok())?;
        self.validate()?;
        Ok(self)
    }

    /// Apply overrides from any key/value source
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_BATCH_LIMIT) {
            self.sync.batch_limit = parse_var(ENV_BATCH_LIMIT, &value)?;
        }
        if let Some(value) = lookup(ENV_SCHEDULE_INTERVAL_SECS) {
            self.sync.schedule_interval_secs = parse_var(ENV_SCHEDULE_INTERVAL_SECS, &value)?;
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = value;
        }
        if let Some(value) = lookup(ENV_LOG_JSON) {
            self.logging.json = parse_var(ENV_LOG_JSON, &value)?;
        }
        Ok(())
    }

    /// Get sync configuration
    pub fn sync(&self) -> &SyncConfig {
        &self.sync
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.sync
            .validate()
            .map_err(|e| JobError::Config(format!("Sync config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| JobError::Config(format!("Logging config error: {}", e)))?;

        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| JobError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| JobError::Config(format!("Invalid value for {}: {}", key, e)))
}
