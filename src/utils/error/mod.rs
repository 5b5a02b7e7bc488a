//! Error handling for background jobs
//!
//! This module defines the error type shared by the job runner, its
//! collaborators and the configuration layer.

#![allow(missing_docs)]

mod helpers;
mod types;

pub use types::{JobError, Result};
