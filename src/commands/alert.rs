use super::analyze::parse_price;
use super::AppContext;
use crate::models::PriceAlert;
use crate::utils::format::format_currency;
use crate::utils::{Align, Table};

const USAGE: &str = "❌ Usage: `alert <model> <threshold>`, `alert list` or `alert remove <id>`";

/// What `alert` was asked to do
#[derive(Debug, PartialEq)]
pub enum AlertAction {
    List,
    Remove(i64),
    Set { model: String, threshold: i64 },
}

/// `alert list`, `alert remove <id>` or `alert <model> <threshold>`
///
/// The threshold is the last argument so model names can span several words.
pub fn parse_args(args: &[&str]) -> Result<AlertAction, String> {
    match args {
        [action] if action.eq_ignore_ascii_case("list") => return Ok(AlertAction::List),
        [action, id] if matches!(action.to_lowercase().as_str(), "remove" | "rm") => {
            let id = id
                .trim_start_matches('#')
                .parse::<i64>()
                .map_err(|_| format!("❌ Invalid alert id '{}'. See `alert list`", id))?;
            return Ok(AlertAction::Remove(id));
        }
        _ => {}
    }

    let Some((threshold, model)) = args.split_last() else {
        return Err(USAGE.to_string());
    };
    let model = model.join(" ").trim().to_string();
    if model.is_empty() {
        return Err(USAGE.to_string());
    }

    Ok(AlertAction::Set {
        model,
        threshold: parse_price(threshold)?,
    })
}

pub async fn execute(ctx: &AppContext, args: &[&str]) -> Result<(), String> {
    let action = parse_args(args)?;
    let session = ctx.require_session()?;

    match action {
        AlertAction::List => {
            let alerts = ctx
                .client
                .fetch_price_alerts(&session)
                .await
                .map_err(|e| e.to_string())?;
            if alerts.is_empty() {
                println!("No price alerts set.");
            } else {
                print!("{}", alert_table(&alerts).render());
            }
        }
        AlertAction::Remove(id) => {
            ctx.client
                .delete_price_alert(&session, id)
                .await
                .map_err(|e| e.to_string())?;
            tracing::info!("🔕 Alert {} removed for user {}", id, session.user_id);
            println!("🔕 Alert #{} removed", id);
        }
        AlertAction::Set { model, threshold } => {
            let alert = ctx
                .client
                .set_price_alert(&session, &model, threshold)
                .await
                .map_err(|e| e.to_string())?;

            tracing::info!(
                "🔔 Alert {} set for {} below {}",
                alert.id,
                alert.gpu_model,
                alert.price_threshold
            );
            println!(
                "🔔 You'll be notified when {} drops below {}",
                alert.gpu_model,
                format_currency(alert.price_threshold)
            );
        }
    }

    Ok(())
}

pub fn alert_table(alerts: &[PriceAlert]) -> Table {
    let mut table = Table::new(vec!["ID", "Model", "Below"])
        .align(0, Align::Right)
        .align(2, Align::Right);
    for alert in alerts {
        table.add_row(vec![
            format!("#{}", alert.id),
            alert.gpu_model.clone(),
            format_currency(alert.price_threshold),
        ]);
    }
    table
}
