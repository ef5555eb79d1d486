//! Single and bulk validation endpoints.

use crate::error::ApiError;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use didscope_core::ReputationRecord;
use serde_json::Value;
use tracing::info;

/// `POST /api/validate`
pub async fn validate_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ReputationRecord>, ApiError> {
    let payload = parse_body(&body)?;
    let phone_number = payload
        .get("phoneNumber")
        .and_then(phone_number_text)
        .filter(|p| !p.is_empty())
        .ok_or(ApiError::PhoneNumberRequired)?;

    info!(phone = %phone_number, "validating number");
    let record = state.service.check_isolated(phone_number).await?;
    Ok(Json(record))
}

/// `POST /api/validate/bulk`
pub async fn validate_bulk_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<ReputationRecord>>, ApiError> {
    let payload = parse_body(&body)?;
    let phone_numbers = phone_numbers_from(&payload)?;

    info!(count = phone_numbers.len(), "validating batch");
    let records = state.service.check_bulk(phone_numbers).await;
    Ok(Json(records))
}

pub(crate) fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "rejecting unparseable body");
        ApiError::InvalidJson
    })
}

/// Text of a submitted number. Strings pass through and JSON numbers are
/// written without a fractional part when they have none.
fn phone_number_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(if let Some(u) = n.as_u64() {
            u.to_string()
        } else if let Some(i) = n.as_i64() {
            i.to_string()
        } else {
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.0}"),
                _ => n.to_string(),
            }
        }),
        _ => None,
    }
}

/// Read `phoneNumbers` as strings, accepting bare JSON numbers too.
fn phone_numbers_from(payload: &Value) -> Result<Vec<String>, ApiError> {
    let items = payload
        .get("phoneNumbers")
        .and_then(Value::as_array)
        .ok_or(ApiError::PhoneNumbersRequired)?;

    items
        .iter()
        .map(|item| phone_number_text(item).ok_or(ApiError::PhoneNumbersRequired))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_phone_numbers_from_mixed_array() {
        let payload = json!({"phoneNumbers": ["+15551234567", 5559876543_u64]});
        assert_eq!(
            phone_numbers_from(&payload).expect("parse numbers"),
            vec!["+15551234567".to_string(), "5559876543".to_string()]
        );
    }

    #[test]
    fn test_whole_float_numbers_have_no_fraction() {
        let payload = json!({"phoneNumbers": [5559876543.0_f64, 5.5_f64]});
        assert_eq!(
            phone_numbers_from(&payload).expect("parse numbers"),
            vec!["5559876543".to_string(), "5.5".to_string()]
        );
        assert_eq!(
            phone_number_text(&json!(5551234567_u64)).as_deref(),
            Some("5551234567")
        );
        assert!(phone_number_text(&json!(true)).is_none());
    }

    #[test]
    fn test_phone_numbers_rejects_bad_shapes() {
        for payload in [
            json!({}),
            json!({"phoneNumbers": "+15551234567"}),
            json!({"phoneNumbers": [null]}),
            json!({"phoneNumbers": [{"n": 1}]}),
        ] {
            assert!(matches!(
                phone_numbers_from(&payload),
                Err(ApiError::PhoneNumbersRequired)
            ));
        }
    }

    #[test]
    fn test_empty_array_is_accepted() {
        let payload = json!({"phoneNumbers": []});
        assert!(phone_numbers_from(&payload).expect("empty ok").is_empty());
    }

    #[test]
    fn test_parse_body_rejects_garbage() {
        assert!(matches!(parse_body(b"{not json"), Err(ApiError::InvalidJson)));
        assert!(parse_body(b"{}").is_ok());
    }
}
