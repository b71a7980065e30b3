use super::AppContext;
use crate::services::analysis_service;

/// Parse a whole-dollar price such as `350`, `$350` or `1,200`
pub fn parse_price(raw: &str) -> Result<i64, String> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    let value: f64 = cleaned
        .parse()
        .map_err(|_| format!("❌ Invalid price '{}'. Use a number, e.g. `350`", raw))?;

    if !value.is_finite() || value <= 0.0 {
        return Err("❌ Price must be greater than zero".to_string());
    }

    Ok(value.round() as i64)
}

/// Split `<model...> <price>`; the last argument is the price
pub fn parse_args(args: &[&str]) -> Result<(String, i64), String> {
    let Some((price, model)) = args.split_last() else {
        return Err("❌ Usage: `analyze <model> <price>`".to_string());
    };
    let model = model.join(" ").trim().to_string();
    if model.is_empty() {
        return Err("❌ Usage: `analyze <model> <price>`".to_string());
    }
    Ok((model, parse_price(price)?))
}

/// `analyze <model> <price>`
pub async fn execute(ctx: &AppContext, args: &[&str]) -> Result<(), String> {
    let (model, price) = parse_args(args)?;

    tracing::info!("💹 Analyzing {} at ${}", model, price);

    let analysis = ctx
        .client
        .analyze_price(&model, price)
        .await
        .map_err(|e| e.to_string())?;

    println!("Price Analysis for {}", analysis.model);
    for line in analysis_service::describe(&analysis) {
        println!("  {}", line);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("350").unwrap(), 350);
        assert_eq!(parse_price("$1,200").unwrap(), 1200);
        assert_eq!(parse_price(" 349.6 ").unwrap(), 350);
    }

    #[test]
    fn test_parse_args_multi_word_model() {
        assert_eq!(
            parse_args(&["RTX", "3080", "400"]).unwrap(),
            ("RTX 3080".to_string(), 400)
        );
        assert_eq!(
            parse_args(&["RX 6800", "$350"]).unwrap(),
            ("RX 6800".to_string(), 350)
        );
        assert!(parse_args(&["400"]).is_err());
        assert!(parse_args(&[]).is_err());
        assert!(parse_args(&["RTX", "cheap"]).is_err());
    }

    #[test]
    fn test_parse_price_rejects_garbage() {
        assert!(parse_price("cheap").is_err());
        assert!(parse_price("0").is_err());
        assert!(parse_price("-5").is_err());
        assert!(parse_price("NaN").is_err());
    }
}
