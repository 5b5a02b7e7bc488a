//! In-memory data store

use super::{
    BankAccountStore, TRANSACTION_CONFLICT_KEY, TransactionStore, UpsertOptions, UpsertResult,
};
use crate::core::models::{BankAccount, Transaction};
use crate::utils::error::{JobError, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::debug;

/// Bank accounts and transactions held in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: RwLock<Vec<BankAccount>>,
    transactions: RwLock<HashMap<String, Transaction>>,
    batch_sizes: RwLock<Vec<usize>>,
    fail_after: RwLock<Option<usize>>,
    upserts: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with bank accounts
    pub fn with_accounts(accounts: Vec<BankAccount>) -> Self {
        let store = Self::new();
        *store.accounts.write() = accounts;
        store
    }

    /// Fail every upsert once `count` upserts have succeeded
    pub fn fail_upserts_after(&self, count: usize) {
        *self.fail_after.write() = Some(count);
    }

    /// Fail every account read
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Stored transaction by conflict key
    pub fn transaction(&self, internal_id: &str) -> Option<Transaction> {
        self.transactions.read().get(internal_id).cloned()
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.read().len()
    }

    /// Size of every upsert batch received, in arrival order
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batch_sizes.read().clone()
    }
}

#[async_trait::async_trait]
impl BankAccountStore for MemoryStore {
    async fn enabled_accounts(&self, team_id: &str) -> Result<Vec<BankAccount>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(JobError::storage("bank_accounts: store unavailable"));
        }

        Ok(self
            .accounts
            .read()
            .iter()
            .filter(|account| account.team_id == team_id && account.enabled)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl TransactionStore for MemoryStore {
    async fn upsert(
        &self,
        batch: Vec<Transaction>,
        options: &UpsertOptions,
    ) -> Result<UpsertResult> {
        if options.on_conflict != TRANSACTION_CONFLICT_KEY {
            return Err(JobError::storage(format!(
                "transactions: no unique constraint on column {}",
                options.on_conflict
            )));
        }

        let done = self.upserts.load(Ordering::SeqCst);
        if matches!(*self.fail_after.read(), Some(limit) if done >= limit) {
            return Err(JobError::storage("transactions: upsert rejected"));
        }

        self.batch_sizes.write().push(batch.len());

        let mut result = UpsertResult::default();
        let mut rows = self.transactions.write();
        for transaction in batch {
            match rows.entry(transaction.internal_id.clone()) {
                Entry::Occupied(_) if options.ignore_duplicates => result.skipped += 1,
                Entry::Occupied(mut existing) => {
                    existing.insert(transaction);
                    result.updated += 1;
                }
                Entry::Vacant(slot) => {
                    slot.insert(transaction);
                    result.inserted += 1;
                }
            }
        }
        drop(rows);

        self.upserts.fetch_add(1, Ordering::SeqCst);
        debug!(
            "upserted transactions: {} inserted, {} updated, {} skipped",
            result.inserted, result.updated, result.skipped
        );
        Ok(result)
    }
}
