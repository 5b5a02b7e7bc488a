//! Storage layer for background jobs
//!
//! Narrow views of the hosted data store: the job reads enabled bank
//! accounts and bulk-upserts transactions. [`MemoryStore`] implements both
//! traits for tests and the local CLI.

/// Fixture loading module
pub mod fixture;
/// In-memory storage module
pub mod memory;

pub use fixture::{Fixture, FixtureEnv};
pub use memory::MemoryStore;

use crate::core::models::{BankAccount, Transaction};
use crate::utils::error::Result;

/// Column transactions conflict on
pub const TRANSACTION_CONFLICT_KEY: &str = "internal_id";

/// Conflict handling for a bulk upsert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOptions {
    /// Unique column a conflicting row is detected on
    pub on_conflict: String,
    /// Leave existing rows untouched instead of replacing them
    pub ignore_duplicates: bool,
}

impl UpsertOptions {
    /// Insert new transactions, skip the ones already stored
    pub fn ignore_duplicate_transactions() -> Self {
        Self {
            on_conflict: TRANSACTION_CONFLICT_KEY.to_string(),
            ignore_duplicates: true,
        }
    }
}

impl Default for UpsertOptions {
    fn default() -> Self {
        Self::ignore_duplicate_transactions()
    }
}

/// Outcome of one bulk upsert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertResult {
    /// Rows that did not exist before
    pub inserted: usize,
    /// Existing rows overwritten
    pub updated: usize,
    /// Existing rows left alone
    pub skipped: usize,
}

impl std::ops::AddAssign for UpsertResult {
    fn add_assign(&mut self, other: Self) {
        self.inserted += other.inserted;
        self.updated += other.updated;
        self.skipped += other.skipped;
    }
}

/// Read access to bank accounts
#[async_trait::async_trait]
pub trait BankAccountStore: Send + Sync {
    /// Enabled accounts of a team, each joined with its bank connection
    async fn enabled_accounts(&self, team_id: &str) -> Result<Vec<BankAccount>>;
}

/// Write access to transactions
#[async_trait::async_trait]
pub trait TransactionStore: Send + Sync {
    /// Insert or update a batch of transactions
    async fn upsert(&self, batch: Vec<Transaction>, options: &UpsertOptions)
    -> Result<UpsertResult>;
}
