//! Market-wide views: the weekly snapshot and the admin outlier report

use serde::{Deserialize, Serialize};

/// A model ranked by how many listings it had this week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotGpu {
    pub model: String,
    #[serde(default)]
    pub listings: u64,
}

/// One of the best-scoring listings of the week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestDeal {
    pub model: String,
    pub price: f64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub deal_score: f64,
}

/// Response of `GET /api/gpus/market-snapshot`
///
/// Every field is optional on the wire; a missing one reads as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    #[serde(default)]
    pub hot_gpus: Vec<HotGpu>,
    #[serde(default)]
    pub best_deals: Vec<BestDeal>,
    #[serde(default)]
    pub avg_score_week: f64,
    #[serde(default)]
    pub avg_score_month: f64,
    #[serde(default = "default_score_trend")]
    pub score_trend: String,
}

fn default_score_trend() -> String {
    "No trend data available".to_string()
}

/// A listing priced far from its model's average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlier {
    pub model: String,
    pub price: f64,
    pub average_price: f64,
    /// Price divided by the average, e.g. `2.1`
    pub percent_of_average: f64,
    #[serde(default)]
    pub reddit_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_defaults() {
        let snapshot: MarketSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.hot_gpus.is_empty());
        assert!(snapshot.best_deals.is_empty());
        assert_eq!(snapshot.avg_score_week, 0.0);
        assert_eq!(snapshot.score_trend, "No trend data available");
    }

    #[test]
    fn test_snapshot_backend_shape() {
        let body = r#"{"hot_gpus":[{"model":"RTX 3080","listings":14}],
            "avg_score_week":6.2,"avg_score_month":5.8,
            "score_trend":"Deals are better this week ✅",
            "best_deals":[{"model":"RX 6800","price":300,"url":"https://r/x","deal_score":9}]}"#;
        let snapshot: MarketSnapshot = serde_json::from_str(body).unwrap();
        assert_eq!(snapshot.hot_gpus[0].listings, 14);
        assert_eq!(snapshot.best_deals[0].deal_score, 9.0);
        assert_eq!(snapshot.avg_score_month, 5.8);
    }

    #[test]
    fn test_outlier_ignores_extra_columns() {
        let body = r#"{"model":"RTX 3080","price":1500,"reddit_post_id":"abc",
            "reddit_url":"https://r/y","reddit_posted_at":1704067200000,
            "average_price":520,"percent_of_average":2.88}"#;
        let outlier: Outlier = serde_json::from_str(body).unwrap();
        assert_eq!(outlier.average_price, 520.0);
        assert_eq!(outlier.reddit_url.as_deref(), Some("https://r/y"));
    }
}
