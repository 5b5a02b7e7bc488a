//! Transactions - Manual Sync
//!
//! Pulls every transaction of a team's enabled bank accounts from their
//! providers and writes them to the data store. A provider hands back an
//! account's full history in one response, so writes go out in bounded
//! batches. The job also makes sure the team has a recurring sync
//! scheduled.

use super::{Events, JobContext, JobDefinition, Jobs};
use crate::core::batch::process_promises_batch;
use crate::core::models::BankAccount;
use crate::core::providers::GetTransactionsRequest;
use crate::services::{ScheduleSpec, team_tags};
use crate::storage::{UpsertOptions, UpsertResult};
use crate::utils::error::{JobError, Result};
use futures::future::try_join_all;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, error, info, instrument, warn};

/// Error surfaced to the job runner when any account fails
pub const SYNC_FAILED_MESSAGE: &str = "Something went wrong";

/// Event payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualSyncPayload {
    pub team_id: String,
}

impl ManualSyncPayload {
    pub fn new(team_id: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.team_id.trim().is_empty() {
            return Err(JobError::validation("teamId must not be empty"));
        }
        Ok(())
    }
}

/// What one run did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub team_id: String,
    /// Enabled accounts synced
    pub accounts: usize,
    /// Transactions returned by providers
    pub fetched: usize,
    pub inserted: usize,
    /// Already stored, left untouched
    pub skipped: usize,
    /// Upsert calls issued
    pub batches: usize,
}

#[derive(Debug, Default)]
struct AccountSync {
    fetched: usize,
    batches: usize,
    upserted: UpsertResult,
}

/// The manual sync job
pub struct ManualSyncJob;

impl ManualSyncJob {
    pub const DEFINITION: JobDefinition = JobDefinition {
        id: Jobs::TRANSACTIONS_MANUAL_SYNC,
        name: "Transactions - Manual Sync",
        version: "0.0.1",
        event: Events::TRANSACTIONS_MANUAL_SYNC,
    };

    /// Run one sync for the payload's team
    #[instrument(skip_all, fields(team_id = %payload.team_id))]
    pub async fn run(ctx: &JobContext, payload: ManualSyncPayload) -> Result<SyncSummary> {
        payload.validate()?;
        let team_id = payload.team_id.as_str();
        let batch_size = ctx
            .config
            .batch_size()
            .ok_or_else(|| JobError::config("batch_limit must be at least 1"))?;

        // Registering again just replaces the schedule
        let spec = ScheduleSpec::every(ctx.config.schedule_interval());
        if let Err(e) = ctx.scheduler.register(team_id, spec).await {
            debug!("Error register new scheduler {}: {}", team_id, e);
        }

        let synced = match Self::sync_team(ctx, team_id, batch_size).await {
            Ok(synced) => synced,
            Err(e) => {
                error!("Manual sync for team {} failed: {}", team_id, e);
                return Err(JobError::job_failed(SYNC_FAILED_MESSAGE));
            }
        };

        for tag in team_tags(team_id) {
            if let Err(e) = ctx.cache.revalidate_tag(&tag).await {
                warn!("Failed to revalidate cache tag {}: {}", tag, e);
            }
        }

        let mut summary = SyncSummary {
            team_id: team_id.to_string(),
            accounts: synced.len(),
            ..Default::default()
        };
        for account in &synced {
            summary.fetched += account.fetched;
            summary.inserted += account.upserted.inserted;
            summary.skipped += account.upserted.skipped;
            summary.batches += account.batches;
        }

        info!(
            "Synced {} accounts for team {}: {} fetched, {} inserted, {} skipped",
            summary.accounts, team_id, summary.fetched, summary.inserted, summary.skipped
        );
        Ok(summary)
    }

    async fn sync_team(
        ctx: &JobContext,
        team_id: &str,
        batch_size: NonZeroUsize,
    ) -> Result<Vec<AccountSync>> {
        let accounts = ctx.accounts.enabled_accounts(team_id).await?;
        debug!("Found {} enabled bank accounts", accounts.len());

        try_join_all(
            accounts
                .iter()
                .map(|account| Self::sync_account(ctx, account, batch_size)),
        )
        .await
    }

    async fn sync_account(
        ctx: &JobContext,
        account: &BankAccount,
        batch_size: NonZeroUsize,
    ) -> Result<AccountSync> {
        let provider = ctx.providers.resolve(account.bank_connection.provider)?;

        let transactions = provider
            .get_transactions(GetTransactionsRequest {
                team_id: account.team_id.clone(),
                account_id: account.account_id.clone(),
                access_token: account.bank_connection.access_token.clone(),
            })
            .await?;
        let fetched = transactions.len();

        let options = &UpsertOptions::ignore_duplicate_transactions();
        let totals = &Mutex::new(UpsertResult::default());
        let batches = &AtomicUsize::new(0);
        let store = &ctx.transactions;

        process_promises_batch(transactions, batch_size, |batch| async move {
            batches.fetch_add(1, Ordering::SeqCst);
            let result = store.upsert(batch, options).await?;
            *totals.lock() += result;
            Ok::<_, JobError>(())
        })
        .await?;

        debug!(
            "Account {} ({}): {} transactions written",
            account.id, account.bank_connection.provider, fetched
        );

        Ok(AccountSync {
            fetched,
            batches: batches.load(Ordering::SeqCst),
            upserted: *totals.lock(),
        })
    }
}
