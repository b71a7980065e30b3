//! Marketplace listing models

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single marketplace post for a GPU
///
/// The per-model listing query returns raw column names and the scraper
/// returns entity field names, so every spelling of the URL and posting
/// time is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub model: String,
    /// NaN when the post had no readable price
    #[serde(default = "missing_price", deserialize_with = "price_or_nan")]
    pub price: f64,
    #[serde(default, alias = "reddit_url", alias = "redditUrl")]
    pub url: Option<String>,
    #[serde(
        default,
        alias = "reddit_posted_at",
        alias = "redditPostedAt",
        deserialize_with = "text_or_none"
    )]
    pub timestamp: Option<String>,
}

fn missing_price() -> f64 {
    f64::NAN
}

fn price_or_nan<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Value::deserialize(deserializer)?
        .as_f64()
        .unwrap_or(f64::NAN))
}

/// Posting times arrive as strings or epoch numbers depending on the endpoint
fn text_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
