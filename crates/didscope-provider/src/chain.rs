//! Ordered provider chain with simulated fallback.

use crate::error::Result;
use crate::provider::{ProviderCapabilities, ReputationProvider};
use crate::providers::{IpqsProvider, NumVerifyProvider, SimulatedProvider};
use didscope_core::{ProvidersConfig, ReputationRecord};
use std::sync::Arc;

/// Error recorded when every provider failed and simulation is disabled.
pub const NO_PROVIDER_MESSAGE: &str = "No reputation provider available";

/// Chain that asks providers in order until one answers.
///
/// Upstream failures never escape the chain. A provider that errors is
/// logged and skipped, and the caller always gets a record back.
pub struct ProviderChain {
    providers: Vec<Arc<dyn ReputationProvider>>,
    fallback: Option<Arc<dyn ReputationProvider>>,
}

impl ProviderChain {
    /// Create an empty chain with no fallback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            fallback: None,
        }
    }

    /// Build the chain described by provider settings.
    ///
    /// IPQS comes first, then NumVerify. A provider is only added when its
    /// credential is set.
    ///
    /// # Errors
    /// Returns error if an HTTP client cannot be created.
    pub fn from_config(config: &ProvidersConfig) -> Result<Self> {
        let mut chain = Self::new();

        if let Some(key) = config.ipqs_credential() {
            chain.add_provider(Arc::new(IpqsProvider::with_base_url(
                key,
                &config.ipqs_base_url,
                config.timeout(),
            )?));
        }

        if let Some(key) = config.numverify_credential() {
            chain.add_provider(Arc::new(NumVerifyProvider::with_base_url(
                key,
                &config.numverify_base_url,
                config.timeout(),
            )?));
        }

        if config.simulate_when_unavailable {
            chain.set_fallback(Arc::new(SimulatedProvider::new()));
        }

        tracing::info!(
            providers = ?chain.provider_ids(),
            simulated_fallback = chain.fallback.is_some(),
            "provider chain configured"
        );

        Ok(chain)
    }

    /// Create a chain from an explicit provider list.
    #[must_use]
    pub fn with_providers(
        providers: Vec<Arc<dyn ReputationProvider>>,
        fallback: Option<Arc<dyn ReputationProvider>>,
    ) -> Self {
        Self {
            providers,
            fallback,
        }
    }

    /// Append a provider to the end of the chain.
    pub fn add_provider(&mut self, provider: Arc<dyn ReputationProvider>) {
        self.providers.push(provider);
    }

    /// Set the provider used when every chained provider fails.
    pub fn set_fallback(&mut self, provider: Arc<dyn ReputationProvider>) {
        self.fallback = Some(provider);
    }

    /// Look up a number and return an unscored record.
    ///
    /// The first successful provider wins. When all fail the fallback is
    /// used, and without one the record is degraded with
    /// `source: unavailable`.
    pub async fn normalize(&self, phone_number: &str) -> ReputationRecord {
        for provider in &self.providers {
            match provider.lookup(phone_number).await {
                Ok(record) => {
                    tracing::debug!(provider = provider.provider_id(), "lookup succeeded");
                    return record;
                }
                Err(e) => {
                    tracing::warn!(
                        provider = provider.provider_id(),
                        error = %e,
                        "provider lookup failed, trying next"
                    );
                }
            }
        }

        if let Some(fallback) = &self.fallback {
            match fallback.lookup(phone_number).await {
                Ok(record) => {
                    tracing::debug!(provider = fallback.provider_id(), "using fallback record");
                    return record;
                }
                Err(e) => {
                    tracing::warn!(
                        provider = fallback.provider_id(),
                        error = %e,
                        "fallback lookup failed"
                    );
                }
            }
        }

        ReputationRecord::degraded(phone_number, NO_PROVIDER_MESSAGE)
    }

    /// Identifiers of the chained providers, in order.
    #[must_use]
    pub fn provider_ids(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.provider_id()).collect()
    }

    /// Get capabilities of all registered providers, fallback last.
    #[must_use]
    pub fn all_capabilities(&self) -> Vec<(String, ProviderCapabilities)> {
        self.providers
            .iter()
            .chain(self.fallback.iter())
            .map(|p| (p.provider_id().to_string(), p.capabilities()))
            .collect()
    }

    /// Whether the chain holds no real provider.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderChain {
    fn default() -> Self {
        Self::new()
    }
}
