//! Test fixtures and data factories
//!
//! All factories create real objects, not mocks.

use chrono::NaiveDate;
use midday_jobs::config::SyncConfig;
use midday_jobs::core::models::{BankAccount, BankConnection, ProviderKind, Transaction};
use midday_jobs::core::providers::{ProviderRegistry, StaticProvider};
use midday_jobs::jobs::JobContext;
use midday_jobs::services::{InMemoryScheduler, RecordingInvalidator};
use midday_jobs::storage::MemoryStore;
use std::sync::Arc;
use uuid::Uuid;

/// Factory for creating bank accounts
pub struct AccountFactory;

impl AccountFactory {
    /// Enabled account of `team_id` connected through `provider`
    pub fn create(team_id: &str, provider: ProviderKind) -> BankAccount {
        let id = Uuid::new_v4().to_string();
        BankAccount {
            account_id: format!("ext_{}", &id[..8]),
            id,
            team_id: team_id.to_string(),
            enabled: true,
            bank_connection: BankConnection {
                provider,
                access_token: Some(format!("access-{}", provider)),
                enrollment_id: None,
            },
        }
    }

    pub fn disabled(team_id: &str, provider: ProviderKind) -> BankAccount {
        let mut account = Self::create(team_id, provider);
        account.enabled = false;
        account
    }
}

/// Factory for creating transactions
pub struct TransactionFactory;

impl TransactionFactory {
    /// `count` distinct transactions for an account
    pub fn for_account(account: &BankAccount, count: usize) -> Vec<Transaction> {
        (0..count)
            .map(|i| Transaction {
                internal_id: format!("{}_{}_{}", account.team_id, account.account_id, i),
                team_id: account.team_id.clone(),
                bank_account_id: account.id.clone(),
                name: format!("Card payment {}", i),
                amount: -((i % 100) as f64) - 0.99,
                currency: "EUR".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Days::new((i % 365) as u64),
                status: Default::default(),
                category: None,
            })
            .collect()
    }
}

/// In-memory job context with handles on every collaborator
pub struct SyncHarness {
    pub ctx: JobContext,
    pub store: Arc<MemoryStore>,
    pub scheduler: Arc<InMemoryScheduler>,
    pub cache: Arc<RecordingInvalidator>,
}

impl SyncHarness {
    pub fn new(
        config: SyncConfig,
        accounts: Vec<BankAccount>,
        providers: Vec<StaticProvider>,
    ) -> Self {
        let registry = providers
            .into_iter()
            .fold(ProviderRegistry::new(), |registry, provider| {
                registry.with(Arc::new(provider))
            });
        let store = Arc::new(MemoryStore::with_accounts(accounts));
        let scheduler = Arc::new(InMemoryScheduler::new());
        let cache = Arc::new(RecordingInvalidator::new());
        let ctx = JobContext::builder()
            .config(config)
            .scheduler(scheduler.clone())
            .accounts(store.clone())
            .transactions(store.clone())
            .providers(registry)
            .cache(cache.clone())
            .build()
            .expect("complete job context");

        Self {
            ctx,
            store,
            scheduler,
            cache,
        }
    }
}
