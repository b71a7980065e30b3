use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::warn;

use crate::models::RawObservation;

/// One row of `GET /api/gpus/price-history` as it arrives on the wire
///
/// Fields are kept loose here; [`parse_price_history`] turns them into
/// typed observations.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceHistoryRecord {
    #[serde(default)]
    pub date: Value,
    #[serde(default)]
    pub low_price: Value,
    #[serde(default)]
    pub high_price: Value,
    #[serde(default)]
    pub avg_price: Value,
    #[serde(default)]
    pub listings: Value,
}

/// Request body for POST favorites
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteRequest<'a> {
    pub user_id: i64,
    pub model: &'a str,
}

/// Request body for POST login and POST register
///
/// The API only ever sees the hex SHA-256 of the password, the same digest
/// the web app sends, so accounts work from either client.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialsRequest<'a> {
    pub email: &'a str,
    pub password: String,
}

impl<'a> CredentialsRequest<'a> {
    pub fn new(email: &'a str, password: &str) -> Self {
        Self {
            email,
            password: hash_password(password),
        }
    }
}

/// Lowercase hex SHA-256 digest of a password
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Response of login and register
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Observations that made it through the boundary, plus how many rows
/// were dropped because their date could not be read
#[derive(Debug, Clone, Default)]
pub struct ParsedHistory {
    pub observations: Vec<RawObservation>,
    pub rejected: usize,
}

/// Comprehensive error type for API operations
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 400 Bad Request
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// 401 Unauthorized
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// 403 Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 429 Too Many Requests
    #[error("Rate Limited: {0}")]
    RateLimited(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Deserialization error
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}

/// Parse and validate a price-history response body
///
/// Rows without a readable date are dropped and counted. Prices that are
/// not numbers become NaN and are left for the chart's validity check; a
/// missing listing count reads as 0.
pub fn parse_price_history(body: &str) -> Result<ParsedHistory, ApiError> {
    let records: Vec<PriceHistoryRecord> = serde_json::from_str(body)
        .map_err(|e| {
            ApiError::DeserializationError(format!("Failed to parse price history: {}", e))
        })?;

    let mut parsed = ParsedHistory::default();
    for (index, record) in records.into_iter().enumerate() {
        let Some(observed_at) = parse_observed_at(&record.date) else {
            warn!("Skipping price history row {}: unreadable date {}", index, record.date);
            parsed.rejected += 1;
            continue;
        };

        parsed.observations.push(RawObservation::new(
            observed_at,
            lenient_price(&record.low_price),
            lenient_price(&record.high_price),
            lenient_price(&record.avg_price),
            lenient_count(&record.listings),
        ));
    }

    Ok(parsed)
}

/// Read a timestamp from an ISO-like string or epoch milliseconds
///
/// The calendar date written in the string is kept as is; offsets are not
/// applied.
pub fn parse_observed_at(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(raw) => parse_date_string(raw.trim()),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.naive_utc()),
        _ => None,
    }
}

fn parse_date_string(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for format in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    // Fall back to whatever precedes the time part
    let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

fn lenient_price(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn lenient_count(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .map(|c| c.min(u32::MAX as u64) as u32)
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_backend_shape() {
        let body = r#"[
            {"date":"2024-01-01","low_price":890,"high_price":1000,"avg_price":945,
             "listings":5,"open_price":900,"close_price":990},
            {"date":"2024-01-02T09:00","low_price":910.5,"high_price":1010,"avg_price":960,"listings":2}
        ]"#;
        let parsed = parse_price_history(body).unwrap();
        assert_eq!(parsed.rejected, 0);
        assert_eq!(parsed.observations.len(), 2);
        assert_eq!(parsed.observations[0].day(), day("2024-01-01"));
        assert_eq!(parsed.observations[0].listings, 5);
        assert_eq!(parsed.observations[1].low_price, 910.5);
        assert_eq!(parsed.observations[1].day(), day("2024-01-02"));
    }

    #[test]
    fn test_non_numeric_prices_become_nan() {
        let body = r#"[{"date":"2024-01-01","low_price":"cheap","high_price":null,"avg_price":"945"}]"#;
        let parsed = parse_price_history(body).unwrap();
        let obs = &parsed.observations[0];
        assert!(obs.low_price.is_nan());
        assert!(obs.high_price.is_nan());
        assert_eq!(obs.avg_price, 945.0);
        assert_eq!(obs.listings, 0);
    }

    #[test]
    fn test_unreadable_dates_are_rejected() {
        let body = r#"[
            {"date":"yesterday","low_price":1,"high_price":2,"avg_price":1.5,"listings":1},
            {"low_price":1,"high_price":2,"avg_price":1.5,"listings":1},
            {"date":"2024-03-04","low_price":1,"high_price":2,"avg_price":1.5,"listings":1}
        ]"#;
        let parsed = parse_price_history(body).unwrap();
        assert_eq!(parsed.rejected, 2);
        assert_eq!(parsed.observations.len(), 1);
    }

    #[test]
    fn test_body_must_be_an_array() {
        let err = parse_price_history(r#"{"message":"oops"}"#).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn test_date_forms() {
        assert_eq!(
            parse_observed_at(&json!("2024-01-01T23:30:00-05:00")).unwrap().date(),
            day("2024-01-01")
        );
        assert_eq!(
            parse_observed_at(&json!("2024-01-01T18:00:00.123")).unwrap().date(),
            day("2024-01-01")
        );
        assert_eq!(
            parse_observed_at(&json!("2024-01-01 18:00:00")).unwrap().date(),
            day("2024-01-01")
        );
        assert_eq!(
            parse_observed_at(&json!("2024-01-01Tgarbage")).unwrap().date(),
            day("2024-01-01")
        );
        assert_eq!(
            parse_observed_at(&json!(1704067200000i64)).unwrap().date(),
            day("2024-01-01")
        );
        assert!(parse_observed_at(&json!(true)).is_none());
    }

    #[test]
    fn test_lenient_count() {
        assert_eq!(lenient_count(&json!(7)), 7);
        assert_eq!(lenient_count(&json!(7.0)), 7);
        assert_eq!(lenient_count(&json!("12")), 12);
        assert_eq!(lenient_count(&json!(-3)), 0);
        assert_eq!(lenient_count(&Value::Null), 0);
    }

    #[test]
    fn test_credentials_carry_password_digest() {
        let body = serde_json::to_string(&CredentialsRequest::new("a@b.c", "hunter2")).unwrap();
        assert_eq!(
            body,
            r#"{"email":"a@b.c","password":"f52fbd32b2b3b86ff88ef6c490628285f482af15ddcb29541f94bcf526a3f6c7"}"#
        );
        assert!(!body.contains("hunter2"));
    }
}
