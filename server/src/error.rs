//! Error responses for HTTP handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use didscope_report::ReportError;
use serde::Serialize;
use thiserror::Error;

/// Error returned by an API handler.
///
/// Clients only see the fixed message of each variant. Internal details go
/// to the log.
#[derive(Debug, Error)]
pub enum ApiError {
    /// `phoneNumber` missing, empty or not a string
    #[error("Phone number is required")]
    PhoneNumberRequired,

    /// `phoneNumbers` missing, not an array, or holding bad elements
    #[error("Phone numbers array is required")]
    PhoneNumbersRequired,

    /// Body is not valid JSON of the expected shape
    #[error("Invalid JSON body")]
    InvalidJson,

    /// Uploaded CSV held no phone numbers
    #[error("No valid phone numbers found in CSV")]
    NoPhoneNumbers,

    /// Unexpected failure
    #[error("Internal server error")]
    Internal(String),
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// User-facing message
    pub error: String,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(detail) = &self {
            tracing::error!(error = %detail, "request failed");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::NoPhoneNumbers => Self::NoPhoneNumbers,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<didscope_batch::BatchError> for ApiError {
    fn from(err: didscope_batch::BatchError) -> Self {
        Self::Internal(err.to_string())
    }
}
