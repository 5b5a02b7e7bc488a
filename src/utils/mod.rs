//! Utility modules for background jobs
//!
//! - **error**: Error types shared across the crate
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{JobError, Result};
pub use logging::init_logging;
