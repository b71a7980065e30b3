use chrono::Utc;
use std::path::PathBuf;

use super::AppContext;
use crate::models::{ChartOutcome, ChartSpec, ChartStyle, Encoding, TimeRange, Trend, ViewState};
use crate::services::{chart_service, render_service};
use crate::utils::{Align, Table};

/// Parsed `history` arguments
#[derive(Debug, PartialEq)]
pub struct HistoryArgs {
    pub view: ViewState,
    pub out: Option<PathBuf>,
}

/// `history <model...> [range] [style] [--range R] [--style S] [--out FILE]`
///
/// Model names span several words ("RTX 3080"), so positional range and
/// style tokens are picked out wherever they appear and the remaining words
/// form the model. The flags accept any value, unknown ones falling back to
/// the defaults.
pub fn parse_args(args: &[&str]) -> Result<HistoryArgs, String> {
    let mut model_parts: Vec<&str> = Vec::new();
    let mut range = None;
    let mut style = None;
    let mut out = None;

    let mut iter = args.iter();
    while let Some(&arg) = iter.next() {
        match arg {
            "--out" | "-o" => {
                let path = iter
                    .next()
                    .ok_or("❌ `--out` needs a file name, e.g. `--out chart.png`")?;
                out = Some(PathBuf::from(*path));
            }
            "--range" | "-r" => {
                let token = iter.next().ok_or("❌ `--range` needs a value, e.g. `--range 3m`")?;
                range = Some(TimeRange::parse(token));
            }
            "--style" | "-s" => {
                let token = iter.next().ok_or("❌ `--style` needs a value, e.g. `--style bar`")?;
                style = Some(ChartStyle::parse(token));
            }
            _ => {
                if let (None, Some(r)) = (range, TimeRange::from_token(arg)) {
                    range = Some(r);
                } else if let (None, Some(s)) = (style, ChartStyle::from_token(arg)) {
                    style = Some(s);
                } else {
                    model_parts.push(arg.trim());
                }
            }
        }
    }

    model_parts.retain(|p| !p.is_empty());
    if model_parts.is_empty() {
        return Err("❌ Usage: `history <model> [range] [style] [--out FILE]`".to_string());
    }

    Ok(HistoryArgs {
        view: ViewState::new(model_parts.join(" "))
            .with_style(style.unwrap_or_default())
            .with_range(range.unwrap_or_default()),
        out,
    })
}

pub async fn execute(ctx: &AppContext, args: &[&str]) -> Result<(), String> {
    let HistoryArgs { view, out } = parse_args(args)?;
    tracing::info!(
        "📈 History requested for {} (range {}, style {})",
        view.model,
        view.range.as_str(),
        view.style.as_str()
    );

    let history = ctx
        .client
        .fetch_price_history(&view.model)
        .await
        .map_err(|e| e.to_string())?;

    if history.rejected > 0 {
        tracing::warn!(
            "{} price history rows for {} had unreadable dates",
            history.rejected,
            view.model
        );
    }

    let outcome = chart_service::price_history_chart(&history.observations, &view, Utc::now());

    println!("Price History for {}", view.model);
    match &outcome {
        ChartOutcome::NoData => println!("{}", ChartOutcome::NO_DATA_MESSAGE),
        ChartOutcome::Chart(spec) => print!("{}", tooltip_table(spec).render()),
    }

    if let Some(path) = out {
        let caption = format!("Price History for {} ({})", view.model, view.range.as_str());
        render_service::render_to_file(
            &outcome,
            &caption,
            &path,
            ctx.config.chart_width,
            ctx.config.chart_height,
        )
        .map_err(|e| e.to_string())?;
        println!("Chart saved to {}", path.display());
    }

    Ok(())
}

/// One row per date with the tooltip values; candlestick charts also show
/// the trend arrow.
pub fn tooltip_table(spec: &ChartSpec) -> Table {
    let trends: Option<Vec<Trend>> = match &spec.encoding {
        Encoding::Candlestick { ranges } => Some(ranges.iter().map(|r| r.trend).collect()),
        _ => None,
    };

    let mut headers = vec!["Date", "Average", "Range", "Listings"];
    if trends.is_some() {
        headers.push("Trend");
    }
    let mut table = Table::new(headers)
        .align(1, Align::Right)
        .align(3, Align::Right);

    for (i, tip) in spec.tooltips.iter().enumerate() {
        let mut row = tip.cells().to_vec();
        if let Some(trends) = &trends {
            let arrow = match trends.get(i) {
                Some(Trend::Decreasing) => "▼",
                _ => "▲",
            };
            row.push(arrow.to_string());
        }
        table.add_row(row);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailySummary;
    use chrono::NaiveDate;

    fn spec(style: ChartStyle) -> ChartSpec {
        let summaries = vec![
            DailySummary {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                low_price: 890.0,
                high_price: 1000.0,
                avg_price: 945.0,
                listings: 5,
            },
            DailySummary {
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                low_price: 880.0,
                high_price: 990.0,
                avg_price: 930.0,
                listings: 2,
            },
        ];
        match chart_service::build_chart(&summaries, style) {
            ChartOutcome::Chart(spec) => spec,
            ChartOutcome::NoData => panic!("expected chart"),
        }
    }

    #[test]
    fn test_parse_defaults() {
        let parsed = parse_args(&["RTX 3080"]).unwrap();
        assert_eq!(parsed.view, ViewState::new("RTX 3080"));
        assert_eq!(parsed.out, None);
    }

    #[test]
    fn test_parse_all_args() {
        let parsed = parse_args(&["RTX 3080", "--out", "c.svg", "3m", "bar"]).unwrap();
        assert_eq!(parsed.view.range, TimeRange::ThreeMonths);
        assert_eq!(parsed.view.style, ChartStyle::Bar);
        assert_eq!(parsed.out, Some(PathBuf::from("c.svg")));
    }

    #[test]
    fn test_parse_multi_word_model() {
        let parsed = parse_args(&["RTX", "3080", "1m", "bar"]).unwrap();
        assert_eq!(parsed.view.model, "RTX 3080");
        assert_eq!(parsed.view.range, TimeRange::OneMonth);
        assert_eq!(parsed.view.style, ChartStyle::Bar);

        let parsed = parse_args(&["RX", "6800", "XT"]).unwrap();
        assert_eq!(parsed.view, ViewState::new("RX 6800 XT"));
    }

    #[test]
    fn test_parse_tokens_anywhere() {
        let parsed = parse_args(&["candlestick", "RTX", "4090", "-o", "a.png", "1y"]).unwrap();
        assert_eq!(parsed.view.model, "RTX 4090");
        assert_eq!(parsed.view.range, TimeRange::OneYear);
        assert_eq!(parsed.view.style, ChartStyle::Candlestick);
        assert_eq!(parsed.out, Some(PathBuf::from("a.png")));
    }

    #[test]
    fn test_parse_unknown_flag_values_fall_back() {
        let parsed = parse_args(&["RTX", "3080", "--range", "2y", "--style", "pie"]).unwrap();
        assert_eq!(parsed.view.model, "RTX 3080");
        assert_eq!(parsed.view.range, TimeRange::All);
        assert_eq!(parsed.view.style, ChartStyle::Line);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&[]).is_err());
        assert!(parse_args(&["  "]).is_err());
        assert!(parse_args(&["RTX 3080", "--out"]).is_err());
        assert!(parse_args(&["1m", "bar"]).is_err());
    }

    #[test]
    fn test_tooltip_table_line() {
        let rendered = tooltip_table(&spec(ChartStyle::Line)).render();
        assert!(rendered.starts_with("Date"));
        assert!(rendered.contains("$945.00 | $890.00 - $1,000.00"));
        assert!(!rendered.contains("Trend"));
    }

    #[test]
    fn test_tooltip_table_candlestick_has_trend() {
        let rendered = tooltip_table(&spec(ChartStyle::Candlestick)).render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].ends_with("Trend"));
        assert!(lines[2].ends_with("▲"));
        assert!(lines[3].ends_with("▼"));
    }
}
