//! Provider serving transactions from memory
//!
//! Stands in for a real aggregator in tests and in the local CLI, where
//! transactions come from a fixture file.

use super::{GetTransactionsRequest, TransactionProvider};
use crate::core::models::{ProviderKind, Transaction};
use crate::utils::error::{JobError, Result};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// In-memory transaction provider
#[derive(Debug)]
pub struct StaticProvider {
    kind: ProviderKind,
    transactions: RwLock<HashMap<String, Vec<Transaction>>>,
    failing: RwLock<HashSet<String>>,
    calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            transactions: RwLock::new(HashMap::new()),
            failing: RwLock::new(HashSet::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Serve `transactions` for the given provider-side account id
    pub fn with_transactions(
        self,
        account_id: impl Into<String>,
        transactions: Vec<Transaction>,
    ) -> Self {
        self.transactions
            .write()
            .insert(account_id.into(), transactions);
        self
    }

    /// Make every fetch for `account_id` fail
    pub fn failing_for(self, account_id: impl Into<String>) -> Self {
        self.failing.write().insert(account_id.into());
        self
    }

    /// Number of fetches served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TransactionProvider for StaticProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn get_transactions(&self, request: GetTransactionsRequest) -> Result<Vec<Transaction>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing.read().contains(&request.account_id) {
            return Err(JobError::provider(format!(
                "{}: failed to fetch transactions for account {}",
                self.kind, request.account_id
            )));
        }

        let transactions = self
            .transactions
            .read()
            .get(&request.account_id)
            .cloned()
            .unwrap_or_default();

        debug!(
            "{} served {} transactions for account {}",
            self.kind,
            transactions.len(),
            request.account_id
        );
        Ok(transactions)
    }
}
