//! Core reputation provider trait and capability tags.

use crate::error::Result;
use async_trait::async_trait;
use didscope_core::{DataSource, ReputationRecord};
use serde::{Deserialize, Serialize};

/// Trait for phone reputation sources.
///
/// An adapter maps its own payload into the canonical record. Adapters
/// should be thread-safe (Send + Sync) for use in async contexts.
#[async_trait]
pub trait ReputationProvider: Send + Sync {
    /// Look up a number and return a normalized, unscored record.
    ///
    /// # Errors
    /// Returns error on network failure, a non-success status, or a payload
    /// that cannot be mapped.
    async fn lookup(&self, phone_number: &str) -> Result<ReputationRecord>;

    /// Get the capabilities of this provider.
    fn capabilities(&self) -> ProviderCapabilities;

    /// Get the unique identifier for this provider.
    fn provider_id(&self) -> &'static str;
}

/// What data a provider can supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct ProviderCapabilities {
    /// Source tag stamped on records from this provider
    pub source: DataSource,
    /// Supplies spam/fraud signals
    pub reputation_signals: bool,
    /// Supplies the carrier name
    pub carrier_lookup: bool,
    /// Supplies location fields
    pub location_lookup: bool,
    /// Produces synthetic data
    pub simulated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_serialization() {
        let caps = ProviderCapabilities {
            source: DataSource::NumVerify,
            reputation_signals: false,
            carrier_lookup: true,
            location_lookup: true,
            simulated: false,
        };

        let json = serde_json::to_string(&caps).expect("serialize capabilities");
        assert!(json.contains("\"numverify\""));
        let parsed: ProviderCapabilities =
            serde_json::from_str(&json).expect("deserialize capabilities");
        assert_eq!(parsed, caps);
    }
}
