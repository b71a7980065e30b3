use super::AppContext;
use crate::models::Outlier;
use crate::utils::format::format_currency;
use crate::utils::{Align, Table};

/// Listings above `average * threshold` or below `average / threshold`
/// count as outliers
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 1.75;

const USAGE: &str = "❌ Usage: `admin outliers [threshold]`, `admin purge [threshold]` or `admin scrape`";

#[derive(Debug, PartialEq)]
pub enum AdminAction {
    Outliers(f64),
    Purge(f64),
    Scrape,
}

pub fn parse_args(args: &[&str]) -> Result<AdminAction, String> {
    match args {
        [action, rest @ ..] => match action.to_lowercase().as_str() {
            "outliers" => Ok(AdminAction::Outliers(parse_threshold(rest)?)),
            "purge" | "delete-outliers" => Ok(AdminAction::Purge(parse_threshold(rest)?)),
            "scrape" | "fetch" if rest.is_empty() => Ok(AdminAction::Scrape),
            _ => Err(USAGE.to_string()),
        },
        [] => Err(USAGE.to_string()),
    }
}

/// Optional threshold argument; it must be at least 1
pub fn parse_threshold(args: &[&str]) -> Result<f64, String> {
    match args {
        [] => Ok(DEFAULT_OUTLIER_THRESHOLD),
        [raw] => {
            let threshold: f64 = raw
                .parse()
                .map_err(|_| format!("❌ Invalid threshold '{}'", raw))?;
            if !threshold.is_finite() || threshold < 1.0 {
                return Err("❌ Threshold must be a number of at least 1, e.g. `1.75`".to_string());
            }
            Ok(threshold)
        }
        _ => Err(USAGE.to_string()),
    }
}

pub async fn execute(ctx: &AppContext, args: &[&str]) -> Result<(), String> {
    let action = parse_args(args)?;
    let session = ctx.require_session()?;

    match action {
        AdminAction::Outliers(threshold) => {
            let outliers = ctx
                .client
                .fetch_outliers(&session, threshold)
                .await
                .map_err(|e| e.to_string())?;
            if outliers.is_empty() {
                println!("No outliers at threshold {}", threshold);
            } else {
                println!("Outliers ({}) at threshold {}", outliers.len(), threshold);
                print!("{}", outlier_table(&outliers).render());
            }
        }
        AdminAction::Purge(threshold) => {
            ctx.client
                .delete_outliers(&session, threshold)
                .await
                .map_err(|e| e.to_string())?;
            tracing::warn!(
                "Outliers deleted by user {} (threshold {})",
                session.user_id,
                threshold
            );
            println!("🗑️ Outliers deleted");
        }
        AdminAction::Scrape => {
            let saved = ctx
                .client
                .fetch_new_listings(&session)
                .await
                .map_err(|e| e.to_string())?;
            tracing::info!("Scrape saved {} new listings", saved.len());
            println!("Fetched {} new listings", saved.len());
        }
    }

    Ok(())
}

pub fn outlier_table(outliers: &[Outlier]) -> Table {
    let mut table = Table::new(vec!["Model", "Price", "Average", "x Avg", "Link"])
        .align(1, Align::Right)
        .align(2, Align::Right)
        .align(3, Align::Right);
    for outlier in outliers {
        table.add_row(vec![
            outlier.model.clone(),
            format_currency(outlier.price),
            format_currency(outlier.average_price),
            format!("{:.2}", outlier.percent_of_average),
            outlier.reddit_url.clone().unwrap_or_default(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        assert_eq!(
            parse_args(&["outliers"]).unwrap(),
            AdminAction::Outliers(DEFAULT_OUTLIER_THRESHOLD)
        );
        assert_eq!(parse_args(&["purge", "2"]).unwrap(), AdminAction::Purge(2.0));
        assert_eq!(parse_args(&["scrape"]).unwrap(), AdminAction::Scrape);
        assert!(parse_args(&[]).is_err());
        assert!(parse_args(&["scrape", "now"]).is_err());
        assert!(parse_args(&["reboot"]).is_err());
    }

    #[test]
    fn test_threshold_bounds() {
        assert_eq!(parse_threshold(&["1"]).unwrap(), 1.0);
        assert!(parse_threshold(&["0.5"]).is_err());
        assert!(parse_threshold(&["inf"]).is_err());
        assert!(parse_threshold(&["big"]).is_err());
        assert!(parse_threshold(&["1.5", "2"]).is_err());
    }

    #[test]
    fn test_outlier_table() {
        let outliers = vec![Outlier {
            model: "RTX 3080".to_string(),
            price: 1500.0,
            average_price: 520.0,
            percent_of_average: 2.88,
            reddit_url: None,
        }];
        let rendered = outlier_table(&outliers).render();
        assert!(rendered.contains("RTX 3080 | $1,500.00 | $520.00 |  2.88"));
    }
}
