//! Fixture-backed sync environment
//!
//! Loads bank accounts and the transactions each provider would return from
//! a JSON document, and wires them into an in-memory [`JobContext`].
//!
//! ```json
//! {
//!   "accounts": [ { "id": "...", "team_id": "...", "account_id": "ext_1",
//!                   "bank_connection": { "provider": "teller" } } ],
//!   "transactions": { "ext_1": [ { "internal_id": "...", ... } ] }
//! }
//! ```

use super::MemoryStore;
use crate::config::SyncConfig;
use crate::core::models::{BankAccount, Transaction};
use crate::core::providers::{ProviderRegistry, StaticProvider};
use crate::jobs::JobContext;
use crate::services::{InMemoryScheduler, RecordingInvalidator};
use crate::utils::error::{JobError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Accounts plus provider responses keyed by provider-side account id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub accounts: Vec<BankAccount>,
    #[serde(default)]
    pub transactions: HashMap<String, Vec<Transaction>>,
}

/// Context built from a fixture, with handles on its in-memory parts
pub struct FixtureEnv {
    pub context: JobContext,
    pub store: Arc<MemoryStore>,
    pub scheduler: Arc<InMemoryScheduler>,
    pub cache: Arc<RecordingInvalidator>,
}

impl Fixture {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading fixture from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| JobError::Config(format!("Failed to read fixture file: {}", e)))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Build an in-memory context serving this fixture
    ///
    /// Each connection's provider gets a [`StaticProvider`] that answers
    /// for that provider's accounts only.
    pub fn into_env(self, config: SyncConfig) -> Result<FixtureEnv> {
        let mut providers: HashMap<_, StaticProvider> = HashMap::new();
        let mut transactions = self.transactions;
        for account in &self.accounts {
            let kind = account.bank_connection.provider;
            let provider = providers
                .remove(&kind)
                .unwrap_or_else(|| StaticProvider::new(kind));
            let account_id = &account.account_id;
            let served = transactions.remove(account_id).unwrap_or_default();
            providers.insert(kind, provider.with_transactions(account_id, served));
        }

        let registry = providers
            .into_values()
            .fold(ProviderRegistry::new(), |registry, provider| {
                registry.with(Arc::new(provider))
            });

        let store = Arc::new(MemoryStore::with_accounts(self.accounts));
        let scheduler = Arc::new(InMemoryScheduler::new());
        let cache = Arc::new(RecordingInvalidator::new());
        let context = JobContext::builder()
            .config(config)
            .scheduler(scheduler.clone())
            .accounts(store.clone())
            .transactions(store.clone())
            .providers(registry)
            .cache(cache.clone())
            .build()?;

        Ok(FixtureEnv {
            context,
            store,
            scheduler,
            cache,
        })
    }
}
