//! Common utilities shared across provider adapters.

use crate::error::{ProviderError, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Note stored in the CNAM display name when a provider cannot check CNAM.
#[must_use]
pub fn cnam_unavailable_note(provider_name: &str) -> String {
    format!("CNAM check not available via {provider_name}")
}

/// Build a standard HTTP client with common timeout settings.
///
/// # Arguments
/// * `timeout` - Request timeout (defaults to 10 seconds if not specified)
///
/// # Errors
/// Returns error if the HTTP client cannot be created.
pub fn build_http_client(timeout: Option<Duration>) -> Result<Client> {
    Client::builder()
        .timeout(timeout.unwrap_or(Duration::from_secs(10)))
        .build()
        .map_err(|e| ProviderError::Internal(format!("failed to create HTTP client: {e}")))
}

/// Turn a non-success status into an `ApiError`, otherwise decode the JSON body.
pub async fn decode_json<T: DeserializeOwned>(provider: &str, response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ProviderError::ApiError {
            provider: provider.to_string(),
            status: status.as_u16(),
            message: error_text,
        });
    }

    response.json().await.map_err(|e| ProviderError::ParseError {
        provider: provider.to_string(),
        message: format!("Failed to parse response: {e}"),
    })
}

/// Treat an empty string from a provider as absent.
#[must_use]
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(Some(Duration::from_secs(3))).is_ok());
        assert!(build_http_client(None).is_ok());
    }

    #[test]
    fn test_cnam_unavailable_note() {
        assert_eq!(
            cnam_unavailable_note("IPQS"),
            "CNAM check not available via IPQS"
        );
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("Verizon".to_string())), Some("Verizon".to_string()));
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(None), None);
    }
}
