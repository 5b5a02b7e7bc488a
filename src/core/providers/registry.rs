//! Provider Registry
//!
//! Maps a connection's [`ProviderKind`] to the client that serves it.

use super::TransactionProvider;
use crate::core::models::ProviderKind;
use crate::utils::error::{JobError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of transaction providers keyed by kind
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn TransactionProvider>>,
}

impl ProviderRegistry {
    /// Create new provider registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider, replacing any earlier one of the same kind
    pub fn register(&mut self, provider: Arc<dyn TransactionProvider>) {
        self.providers.insert(provider.kind(), provider);
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, provider: Arc<dyn TransactionProvider>) -> Self {
        self.register(provider);
        self
    }

    /// Get provider by kind
    pub fn get(&self, kind: ProviderKind) -> Option<Arc<dyn TransactionProvider>> {
        self.providers.get(&kind).cloned()
    }

    /// Get provider by kind, failing when none is registered
    pub fn resolve(&self, kind: ProviderKind) -> Result<Arc<dyn TransactionProvider>> {
        self.get(kind)
            .ok_or_else(|| JobError::provider(format!("no provider registered for {}", kind)))
    }

    /// Check if provider is registered
    pub fn contains(&self, kind: ProviderKind) -> bool {
        self.providers.contains_key(&kind)
    }

    /// Get provider count
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("provider_count", &self.providers.len())
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}
