//! Daily summary models

use chrono::NaiveDate;

/// One aggregated row per calendar date
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub low_price: f64,
    pub high_price: f64,
    pub avg_price: f64,
    pub listings: u32,
}

impl DailySummary {
    /// True when every price field can be drawn
    pub fn is_plottable(&self) -> bool {
        self.low_price.is_finite() && self.high_price.is_finite() && self.avg_price.is_finite()
    }
}
