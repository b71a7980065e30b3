//! Market comparison models

use serde::{Deserialize, Serialize};

/// Whether a candidate price sits below or above the market average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketDirection {
    Below,
    Above,
}

/// Result of the price-analysis endpoint
///
/// The API omits the rating fields and sends only `message` when it has too
/// little recent data, or when every recent listing has the same price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAnalysis {
    pub model: String,
    pub your_price: f64,
    #[serde(default)]
    pub average_price: Option<f64>,
    #[serde(default)]
    pub price_rating: Option<String>,
    #[serde(default)]
    pub percent_vs_market: Option<f64>,
    #[serde(default)]
    pub market_direction: Option<MarketDirection>,
    #[serde(default)]
    pub deal_score: Option<u8>,
    #[serde(default)]
    pub message: Option<String>,
}
