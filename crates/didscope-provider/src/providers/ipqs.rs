//! IPQualityScore phone reputation provider.

use super::common::{build_http_client, cnam_unavailable_note, decode_json, non_empty};
use crate::error::{ProviderError, Result};
use crate::provider::{ProviderCapabilities, ReputationProvider};
use async_trait::async_trait;
use didscope_core::{
    AttestationLevel, Cnam, DataSource, Location, Reputation, ReputationRecord, RiskLevel,
};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Fraud score above which a number is considered a likely scam and high risk.
const HIGH_FRAUD_SCORE: f64 = 75.0;
/// Fraud score above which a number is medium risk.
const MEDIUM_FRAUD_SCORE: f64 = 50.0;

/// IPQualityScore provider.
///
/// Supplies validity, carrier, line type, location and a fraud score. It has
/// no attestation or CNAM data.
pub struct IpqsProvider {
    api_key: String,
    client: Client,
    base_url: String,
}

impl IpqsProvider {
    /// Create a provider against the public IPQS endpoint.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        Self::with_base_url(api_key, "https://ipqualityscore.com", timeout)
    }

    /// Create a provider against a custom base URL.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            api_key: api_key.into(),
            client: build_http_client(Some(timeout))?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn lookup_url(&self, phone_number: &str) -> String {
        format!(
            "{}/api/json/phone/{}/{}",
            self.base_url,
            self.api_key,
            urlencoding::encode(phone_number)
        )
    }

    /// Map an IPQS payload into the canonical record.
    fn map_response(phone_number: &str, payload: IpqsResponse) -> Result<ReputationRecord> {
        if payload.success == Some(false) {
            return Err(ProviderError::Rejected {
                provider: "ipqs".to_string(),
                message: payload
                    .message
                    .unwrap_or_else(|| "unsuccessful lookup".to_string()),
            });
        }

        let fraud_score = payload.fraud_score.unwrap_or(0.0);
        let risk_level = if fraud_score > HIGH_FRAUD_SCORE {
            RiskLevel::High
        } else if fraud_score > MEDIUM_FRAUD_SCORE {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        let mut record = ReputationRecord::new(phone_number, DataSource::Ipqs);
        record.is_valid = payload.valid.unwrap_or(false);
        record.carrier = non_empty(payload.carrier);
        record.line_type = non_empty(payload.line_type);
        record.location = Some(Location {
            city: non_empty(payload.city),
            state: non_empty(payload.region),
            country: non_empty(payload.country),
        });
        record.reputation = Reputation {
            spam_score: Some(fraud_score),
            spam_likely: payload.recent_abuse.unwrap_or(false),
            scam_likely: fraud_score > HIGH_FRAUD_SCORE,
            risk_level,
            flagged_by_carriers: Vec::new(),
            attestation_level: Some(AttestationLevel::Unknown),
        };
        record.cnam = Some(Cnam {
            registered: None,
            display_name: Some(cnam_unavailable_note("IPQS")),
        });
        // A payload without `active` is read as inactive.
        record.disconnected = Some(!payload.active.unwrap_or(false));
        record.reassigned = Some(false);
        Ok(record)
    }
}

#[async_trait]
impl ReputationProvider for IpqsProvider {
    async fn lookup(&self, phone_number: &str) -> Result<ReputationRecord> {
        let response = self
            .client
            .get(self.lookup_url(phone_number))
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let payload: IpqsResponse = decode_json("ipqs", response).await?;
        Self::map_response(phone_number, payload)
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            source: DataSource::Ipqs,
            reputation_signals: true,
            carrier_lookup: true,
            location_lookup: true,
            simulated: false,
        }
    }

    fn provider_id(&self) -> &'static str {
        "ipqs"
    }
}

// IPQS API types

#[derive(Debug, Deserialize)]
struct IpqsResponse {
    success: Option<bool>,
    message: Option<String>,
    valid: Option<bool>,
    active: Option<bool>,
    carrier: Option<String>,
    line_type: Option<String>,
    city: Option<String>,
    region: Option<String>,
    country: Option<String>,
    fraud_score: Option<f64>,
    recent_abuse: Option<bool>,
}
