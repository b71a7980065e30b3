use super::AppContext;
use crate::models::MarketSnapshot;
use crate::services::analysis_service::score_color;
use crate::utils::format::format_currency;
use crate::utils::{Align, Table};

/// `market`: this week's most listed models, deal quality and best deals
pub async fn execute(ctx: &AppContext) -> Result<(), String> {
    let snapshot = ctx
        .client
        .fetch_market_snapshot()
        .await
        .map_err(|e| e.to_string())?;

    tracing::debug!(
        "Market snapshot: {} hot models, {} best deals",
        snapshot.hot_gpus.len(),
        snapshot.best_deals.len()
    );
    print!("{}", render_snapshot(&snapshot));
    Ok(())
}

pub fn render_snapshot(snapshot: &MarketSnapshot) -> String {
    let mut out = String::new();

    out.push_str("🔥 Most Listed GPUs (7 days)\n");
    if snapshot.hot_gpus.is_empty() {
        out.push_str("No listings this week.\n");
    } else {
        let mut hot = Table::new(vec!["Model", "Listings"]).align(1, Align::Right);
        for gpu in &snapshot.hot_gpus {
            hot.add_row(vec![gpu.model.clone(), gpu.listings.to_string()]);
        }
        out.push_str(&hot.render());
    }

    out.push_str(&format!(
        "\n📊 Deal Quality\nThis week: {:.1}/10  Last month: {:.1}/10\n{}\n",
        snapshot.avg_score_week, snapshot.avg_score_month, snapshot.score_trend
    ));

    out.push_str("\n💰 Best Deals\n");
    if snapshot.best_deals.is_empty() {
        out.push_str("No scored deals this week.\n");
    } else {
        let mut deals = Table::new(vec!["Model", "Price", "Score", "Link"])
            .align(1, Align::Right)
            .align(2, Align::Right);
        for deal in &snapshot.best_deals {
            let score = deal.deal_score.round() as i64;
            deals.add_row(vec![
                deal.model.clone(),
                format_currency(deal.price),
                format!("{}/10 ({})", score, score_color(score)),
                deal.url.clone().unwrap_or_default(),
            ]);
        }
        out.push_str(&deals.render());
    }

    out
}
