//! Data models shared by the commands and services
//!
//! Each model is the typed form of something the price API returns, or a
//! value the chart pipeline derives from it.

pub mod observation;
pub mod summary;
pub mod chart;
pub mod analysis;
pub mod listing;
pub mod alert;
pub mod market;

// Re-export commonly used types for convenience
pub use observation::RawObservation;
pub use summary::DailySummary;
pub use chart::{
    AreaFill, AxisDomain, BarMark, ChartOutcome, ChartSpec, ChartStyle, Encoding, RangeMark,
    SeriesPoint, TimeRange, Tooltip, Trend, ViewState,
};
pub use analysis::{MarketDirection, PriceAnalysis};
pub use listing::Listing;
pub use alert::{Favorite, FavoriteResult, PriceAlert};
pub use market::{MarketSnapshot, Outlier};
