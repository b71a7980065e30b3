use crate::models::{MarketDirection, PriceAnalysis};
use crate::utils::format::format_currency;

/// Fallback for anything outside the 0-10 scale
pub const UNKNOWN_SCORE_COLOR: &str = "#d1d5db";

const SCORE_COLORS: [&str; 11] = [
    "#ef4444", // red
    "#f97316",
    "#fb923c",
    "#facc15", // yellow
    "#a3e635",
    "#4ade80",
    "#22c55e", // green
    "#16a34a",
    "#15803d",
    "#166534",
    "#7e22ce", // purple, best possible deal
];

/// Hex colour for a deal score
pub fn score_color(score: i64) -> &'static str {
    usize::try_from(score)
        .ok()
        .and_then(|i| SCORE_COLORS.get(i))
        .copied()
        .unwrap_or(UNKNOWN_SCORE_COLOR)
}

/// Human-readable lines for a price analysis
pub fn describe(analysis: &PriceAnalysis) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(avg) = analysis.average_price {
        lines.push(format!("Market avg: {}", format_currency(avg)));
    }
    lines.push(format!("Your price: {}", format_currency(analysis.your_price)));

    let (Some(rating), Some(score)) = (&analysis.price_rating, analysis.deal_score) else {
        let message = analysis
            .message
            .clone()
            .unwrap_or_else(|| "No rating available for this price.".to_string());
        lines.push(message);
        return lines;
    };

    lines.push(format!("Status: {}", rating));

    if let (Some(pct), Some(direction)) = (analysis.percent_vs_market, analysis.market_direction) {
        let word = match direction {
            MarketDirection::Below => "below",
            MarketDirection::Above => "above",
        };
        lines.push(format!("Difference: {:.1}% {} market", pct, word));
    }

    lines.push(format!(
        "Deal score: {}/10 ({})",
        score,
        score_color(i64::from(score))
    ));

    lines
}
