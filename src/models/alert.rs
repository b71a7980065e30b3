//! Favorite and price-alert models

use serde::{Deserialize, Serialize};

/// Response of the add/remove favorite endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteResult {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// A model on the user's favorites list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub model: String,
}

/// A stored "notify me below this price" preference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAlert {
    pub id: i64,
    pub user_id: i64,
    pub gpu_model: String,
    pub price_threshold: f64,
}
