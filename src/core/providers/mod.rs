//! Bank data providers
//!
//! The job only needs one thing from an aggregator: every transaction for an
//! account, already mapped to [`Transaction`] rows. Wire protocols live
//! behind the [`TransactionProvider`] trait.

pub mod registry;
pub mod static_provider;

pub use registry::ProviderRegistry;
pub use static_provider::StaticProvider;

use crate::core::models::{ProviderKind, Transaction};
use crate::utils::error::Result;

/// Arguments for a transaction fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetTransactionsRequest {
    pub team_id: String,
    /// Provider-side account id
    pub account_id: String,
    pub access_token: Option<String>,
}

/// Source of transactions for linked bank accounts
#[async_trait::async_trait]
pub trait TransactionProvider: Send + Sync {
    /// Which aggregator this is
    fn kind(&self) -> ProviderKind;

    /// Fetch all transactions for one account in a single response
    async fn get_transactions(&self, request: GetTransactionsRequest) -> Result<Vec<Transaction>>;
}
