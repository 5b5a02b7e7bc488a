//! Error types for background jobs

use thiserror::Error;

/// Result type alias for background jobs
pub type Result<T> = std::result::Result<T, JobError>;

/// Main error type for background jobs
#[derive(Error, Debug)]
pub enum JobError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Scheduler registration errors
    #[error("Scheduler error: {0}")]
    Scheduler(String),

    /// Bank provider errors
    #[error("Provider error: {0}")]
    Provider(String),

    /// Data store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// A job run failed as a whole
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
