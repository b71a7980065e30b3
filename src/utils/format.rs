//! Display formatting for prices

/// Format a price as US dollars with thousands separators, e.g. `$1,234.50`
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, fraction)
}

/// Axis label: whole dollars, no separators
pub fn format_axis_price(value: f64) -> String {
    format!("${:.0}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(945.0), "$945.00");
        assert_eq!(format_currency(1000.0), "$1,000.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(-12.5), "-$12.50");
    }

    #[test]
    fn test_format_currency_non_finite() {
        assert_eq!(format_currency(f64::NAN), "n/a");
        assert_eq!(format_currency(f64::INFINITY), "n/a");
    }

    #[test]
    fn test_format_axis_price() {
        assert_eq!(format_axis_price(855.0), "$855");
    }
}
