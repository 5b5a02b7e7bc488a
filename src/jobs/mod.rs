//! Background jobs
//!
//! Jobs are triggered by named events carrying a JSON payload. Each job
//! declares the event it listens to and deserializes its payload before
//! running.

pub mod context;
pub mod manual_sync;

pub use context::{JobContext, JobContextBuilder};
pub use manual_sync::{ManualSyncJob, ManualSyncPayload, SyncSummary};

use crate::utils::error::{JobError, Result};
use serde::Serialize;
use tracing::info;

/// Job identifiers
pub struct Jobs;

impl Jobs {
    pub const TRANSACTIONS_MANUAL_SYNC: &'static str = "transactions-manual-sync";
}

/// Event names jobs are triggered by
pub struct Events;

impl Events {
    pub const TRANSACTIONS_MANUAL_SYNC: &'static str = "transactions-manual-sync";
}

/// Static description of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JobDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    /// Event that triggers the job
    pub event: &'static str,
}

/// Every job this crate defines
pub fn definitions() -> Vec<JobDefinition> {
    vec![ManualSyncJob::DEFINITION]
}

/// Run the job subscribed to `event` with a raw JSON payload
///
/// Returns the job's output as JSON.
pub async fn trigger(
    ctx: &JobContext,
    event: &str,
    payload: serde_json::Value,
) -> Result<serde_json::Value> {
    let definition = definitions()
        .into_iter()
        .find(|definition| definition.event == event)
        .ok_or_else(|| JobError::validation(format!("no job listens to event {}", event)))?;

    info!(
        "Triggering job {} ({}) v{}",
        definition.id, definition.name, definition.version
    );

    match definition.id {
        Jobs::TRANSACTIONS_MANUAL_SYNC => {
            let payload: ManualSyncPayload = serde_json::from_value(payload)
                .map_err(|e| JobError::validation(format!("invalid payload: {}", e)))?;
            let summary = ManualSyncJob::run(ctx, payload).await?;
            Ok(serde_json::to_value(summary)?)
        }
        other => Err(JobError::internal(format!("job {} has no runner", other))),
    }
}
