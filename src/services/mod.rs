//! Services module
//!
//! External services a job talks to: the recurring-job scheduler and the
//! dashboard cache.

pub mod cache;
pub mod scheduler;

pub use cache::{CacheInvalidator, RecordingInvalidator, team_tags};
pub use scheduler::{InMemoryScheduler, ScheduleSpec, Scheduler};
