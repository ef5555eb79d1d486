//! NumVerify (apilayer) number validation provider.

use super::common::{build_http_client, cnam_unavailable_note, decode_json, non_empty};
use crate::error::{ProviderError, Result};
use crate::provider::{ProviderCapabilities, ReputationProvider};
use async_trait::async_trait;
use didscope_core::{Cnam, DataSource, Location, ReputationRecord};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// NumVerify provider.
///
/// Validation and carrier data only. Reputation fields keep their defaults.
pub struct NumVerifyProvider {
    access_key: String,
    client: Client,
    base_url: String,
}

impl NumVerifyProvider {
    /// Create a provider against the public NumVerify endpoint.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(access_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        Self::with_base_url(access_key, "http://apilayer.net", timeout)
    }

    /// Create a provider against a custom base URL.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_base_url(
        access_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            access_key: access_key.into(),
            client: build_http_client(Some(timeout))?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn map_response(phone_number: &str, payload: NumVerifyResponse) -> Result<ReputationRecord> {
        if payload.success == Some(false) {
            let message = payload
                .error
                .and_then(|e| e.info.or(e.kind))
                .unwrap_or_else(|| "unsuccessful lookup".to_string());
            return Err(ProviderError::Rejected {
                provider: "numverify".to_string(),
                message,
            });
        }

        let mut record = ReputationRecord::new(phone_number, DataSource::NumVerify);
        record.is_valid = payload.valid.unwrap_or(false);
        record.carrier = non_empty(payload.carrier);
        record.line_type = non_empty(payload.line_type);
        record.location = Some(Location {
            city: None,
            state: None,
            country: non_empty(payload.country_name),
        });
        record.cnam = Some(Cnam {
            registered: None,
            display_name: Some(cnam_unavailable_note("NumVerify")),
        });
        Ok(record)
    }
}

#[async_trait]
impl ReputationProvider for NumVerifyProvider {
    async fn lookup(&self, phone_number: &str) -> Result<ReputationRecord> {
        let response = self
            .client
            .get(format!("{}/api/validate", self.base_url))
            .query(&[("access_key", self.access_key.as_str()), ("number", phone_number)])
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let payload: NumVerifyResponse = decode_json("numverify", response).await?;
        Self::map_response(phone_number, payload)
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            source: DataSource::NumVerify,
            reputation_signals: false,
            carrier_lookup: true,
            location_lookup: true,
            simulated: false,
        }
    }

    fn provider_id(&self) -> &'static str {
        "numverify"
    }
}

// NumVerify API types

#[derive(Debug, Deserialize)]
struct NumVerifyResponse {
    success: Option<bool>,
    error: Option<NumVerifyError>,
    valid: Option<bool>,
    carrier: Option<String>,
    line_type: Option<String>,
    country_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NumVerifyError {
    #[serde(rename = "type")]
    kind: Option<String>,
    info: Option<String>,
}
