//! Job execution context
//!
//! Everything a job touches outside the process is reached through this
//! context, so a job can run against the hosted services or entirely in
//! memory.

use crate::config::SyncConfig;
use crate::core::providers::ProviderRegistry;
use crate::services::{CacheInvalidator, Scheduler};
use crate::storage::{BankAccountStore, TransactionStore};
use crate::utils::error::{JobError, Result};
use std::sync::Arc;

/// Collaborators and settings handed to every job run
#[derive(Clone)]
pub struct JobContext {
    pub config: SyncConfig,
    pub scheduler: Arc<dyn Scheduler>,
    pub accounts: Arc<dyn BankAccountStore>,
    pub transactions: Arc<dyn TransactionStore>,
    pub providers: ProviderRegistry,
    pub cache: Arc<dyn CacheInvalidator>,
}

impl JobContext {
    pub fn builder() -> JobContextBuilder {
        JobContextBuilder::default()
    }
}

impl std::fmt::Debug for JobContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobContext")
            .field("config", &self.config)
            .field("providers", &self.providers)
            .finish_non_exhaustive()
    }
}

/// Builder for [`JobContext`]
#[derive(Default)]
pub struct JobContextBuilder {
    config: Option<SyncConfig>,
    scheduler: Option<Arc<dyn Scheduler>>,
    accounts: Option<Arc<dyn BankAccountStore>>,
    transactions: Option<Arc<dyn TransactionStore>>,
    providers: ProviderRegistry,
    cache: Option<Arc<dyn CacheInvalidator>>,
}

impl JobContextBuilder {
    /// Sync settings; defaults apply when not set
    pub fn config(mut self, config: SyncConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn accounts(mut self, accounts: Arc<dyn BankAccountStore>) -> Self {
        self.accounts = Some(accounts);
        self
    }

    pub fn transactions(mut self, transactions: Arc<dyn TransactionStore>) -> Self {
        self.transactions = Some(transactions);
        self
    }

    pub fn providers(mut self, providers: ProviderRegistry) -> Self {
        self.providers = providers;
        self
    }

    pub fn cache(mut self, cache: Arc<dyn CacheInvalidator>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Build the context, failing if a collaborator is missing
    pub fn build(self) -> Result<JobContext> {
        Ok(JobContext {
            config: self.config.unwrap_or_default(),
            scheduler: self.scheduler.ok_or_else(|| missing("scheduler"))?,
            accounts: self.accounts.ok_or_else(|| missing("bank account store"))?,
            transactions: self.transactions.ok_or_else(|| missing("transaction store"))?,
            providers: self.providers,
            cache: self.cache.ok_or_else(|| missing("cache invalidator"))?,
        })
    }
}

fn missing(what: &str) -> JobError {
    JobError::config(format!("job context is missing a {}", what))
}
