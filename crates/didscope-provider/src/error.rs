//! Error types for the provider subsystem.

use thiserror::Error;

/// Errors that can occur while querying a reputation provider.
///
/// None of these reach API callers: the provider chain logs them and
/// treats the provider as unavailable.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// API error with status code
    #[error("API error ({provider}): status {status}, {message}")]
    ApiError {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Provider answered 2xx but reported failure in the payload
    #[error("request rejected by {provider}: {message}")]
    Rejected {
        /// Provider name
        provider: String,
        /// Message from the payload
        message: String,
    },

    /// Response parsing error
    #[error("failed to parse response from {provider}: {message}")]
    ParseError {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
