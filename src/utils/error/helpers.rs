//! Helper functions for creating specific error types

use super::types::JobError;

impl JobError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn scheduler<S: Into<String>>(message: S) -> Self {
        Self::Scheduler(message.into())
    }

    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider(message.into())
    }

    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage(message.into())
    }

    pub fn job_failed<S: Into<String>>(message: S) -> Self {
        Self::JobFailed(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether a caller-side retry policy may reasonably try again.
    ///
    /// Only failures of external collaborators qualify; bad input and
    /// configuration will fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Scheduler(_) | Self::Provider(_) | Self::Storage(_)
        )
    }
}
