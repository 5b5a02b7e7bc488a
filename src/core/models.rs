//! Domain models for bank sync
//!
//! Rows as the job sees them after the account/connection join. Field
//! names follow the data store columns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bank data aggregator backing a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gocardless,
    Plaid,
    Teller,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gocardless => "gocardless",
            Self::Plaid => "plaid",
            Self::Teller => "teller",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials for one linked institution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankConnection {
    pub provider: ProviderKind,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub enrollment_id: Option<String>,
}

/// A bank account owned by a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    /// Internal id
    pub id: String,
    pub team_id: String,
    /// Account id on the provider side
    pub account_id: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub bank_connection: BankConnection,
}

fn default_enabled() -> bool {
    true
}

/// Settlement state reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Posted,
    Pending,
}

/// A transaction ready to be written to the data store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Conflict key for upserts
    pub internal_id: String,
    pub team_id: String,
    pub bank_account_id: String,
    pub name: String,
    pub amount: f64,
    pub currency: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default)]
    pub category: Option<String>,
}
