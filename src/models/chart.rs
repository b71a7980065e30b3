//! Chart generation models

use chrono::{Duration, NaiveDate};

use crate::utils::format::format_currency;

/// Visual encoding selected for the price history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartStyle {
    #[default]
    Line,
    Area,
    Bar,
    Candlestick,
}

impl ChartStyle {
    /// Parse a style token. Anything unrecognised draws the line chart.
    pub fn parse(token: &str) -> Self {
        Self::from_token(token).unwrap_or_else(|| {
            tracing::debug!("Unknown chart style '{}', drawing line chart", token);
            ChartStyle::Line
        })
    }

    /// The style a token names, if it names one
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "line" => Some(ChartStyle::Line),
            "area" => Some(ChartStyle::Area),
            "bar" => Some(ChartStyle::Bar),
            "candlestick" | "candle" | "range" => Some(ChartStyle::Candlestick),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartStyle::Line => "line",
            ChartStyle::Area => "area",
            ChartStyle::Bar => "bar",
            ChartStyle::Candlestick => "candlestick",
        }
    }
}

/// Relative window used to trim the charted sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TimeRange {
    OneWeek,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    #[default]
    All,
}

impl TimeRange {
    /// Parse a range token
    /// Supported: 1w, 1m, 3m, 6m, 1y, all. Unknown tokens mean "all".
    pub fn parse(token: &str) -> Self {
        Self::from_token(token).unwrap_or_else(|| {
            tracing::debug!("Unknown time range '{}', showing all data", token);
            TimeRange::All
        })
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "1w" => Some(TimeRange::OneWeek),
            "1m" => Some(TimeRange::OneMonth),
            "3m" => Some(TimeRange::ThreeMonths),
            "6m" => Some(TimeRange::SixMonths),
            "1y" => Some(TimeRange::OneYear),
            "all" => Some(TimeRange::All),
            _ => None,
        }
    }

    /// Window length, `None` for no time filter
    pub fn duration(&self) -> Option<Duration> {
        match self {
            TimeRange::OneWeek => Some(Duration::days(7)),
            TimeRange::OneMonth => Some(Duration::days(30)),
            TimeRange::ThreeMonths => Some(Duration::days(90)),
            TimeRange::SixMonths => Some(Duration::days(180)),
            TimeRange::OneYear => Some(Duration::days(365)),
            TimeRange::All => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::OneWeek => "1w",
            TimeRange::OneMonth => "1m",
            TimeRange::ThreeMonths => "3m",
            TimeRange::SixMonths => "6m",
            TimeRange::OneYear => "1y",
            TimeRange::All => "all",
        }
    }
}

/// What the user is currently looking at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub model: String,
    pub style: ChartStyle,
    pub range: TimeRange,
}

impl ViewState {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            style: ChartStyle::default(),
            range: TimeRange::default(),
        }
    }

    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_range(mut self, range: TimeRange) -> Self {
        self.range = range;
        self
    }
}

/// Value-axis bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
}

/// A point on the average-price series. `x` is the position along the date
/// axis, where whole numbers land on dates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub x: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarMark {
    pub date: NaiveDate,
    pub height: f64,
}

/// Direction of the average price against the previous date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    NonDecreasing,
    Decreasing,
}

impl Trend {
    /// Colour of the low-high segment
    pub fn range_color(&self) -> (u8, u8, u8) {
        match self {
            Trend::NonDecreasing => (0x15, 0x80, 0x3d),
            Trend::Decreasing => (0xdc, 0x26, 0x26),
        }
    }

    /// Colour of the average tick
    pub fn tick_color(&self) -> (u8, u8, u8) {
        match self {
            Trend::NonDecreasing => (0x22, 0xc5, 0x5e),
            Trend::Decreasing => (0xef, 0x44, 0x44),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeMark {
    pub date: NaiveDate,
    pub low: f64,
    pub high: f64,
    pub avg: f64,
    pub trend: Trend,
}

/// Gradient under the area series, opacity at the top and bottom stops
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaFill {
    pub baseline: f64,
    pub top_opacity: f64,
    pub bottom_opacity: f64,
}

/// Style-specific geometry
#[derive(Debug, Clone, PartialEq)]
pub enum Encoding {
    Line {
        markers: Vec<SeriesPoint>,
        curve: Vec<SeriesPoint>,
    },
    Area {
        markers: Vec<SeriesPoint>,
        curve: Vec<SeriesPoint>,
        fill: AreaFill,
    },
    Bar {
        bars: Vec<BarMark>,
    },
    Candlestick {
        ranges: Vec<RangeMark>,
    },
}

/// Hover text for one date
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub date: NaiveDate,
    pub avg_price: f64,
    pub low_price: f64,
    pub high_price: f64,
    pub listings: u32,
}

impl Tooltip {
    /// Date, average, low-high range and listing count, formatted for display
    pub fn cells(&self) -> [String; 4] {
        [
            self.date.format("%Y-%m-%d").to_string(),
            format_currency(self.avg_price),
            format!(
                "{} - {}",
                format_currency(self.low_price),
                format_currency(self.high_price)
            ),
            self.listings.to_string(),
        ]
    }
}

/// A renderable chart description
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub style: ChartStyle,
    pub dates: Vec<NaiveDate>,
    pub domain: AxisDomain,
    pub encoding: Encoding,
    pub tooltips: Vec<Tooltip>,
}

/// Result of building a chart: either something to draw or the empty state
#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    NoData,
    Chart(ChartSpec),
}

impl ChartOutcome {
    pub const NO_DATA_MESSAGE: &'static str = "No price data available";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_tokens() {
        assert_eq!(TimeRange::parse("1w"), TimeRange::OneWeek);
        assert_eq!(TimeRange::parse("1M"), TimeRange::OneMonth);
        assert_eq!(TimeRange::parse("6m").duration(), Some(Duration::days(180)));
        assert_eq!(TimeRange::parse("1y").duration(), Some(Duration::days(365)));
        assert_eq!(TimeRange::parse("all").duration(), None);
    }

    #[test]
    fn test_unknown_time_range_is_all() {
        assert_eq!(TimeRange::parse("2y"), TimeRange::All);
        assert_eq!(TimeRange::parse(""), TimeRange::All);
    }

    #[test]
    fn test_from_token_only_knows_real_tokens() {
        assert_eq!(TimeRange::from_token("3M"), Some(TimeRange::ThreeMonths));
        assert_eq!(TimeRange::from_token("3080"), None);
        assert_eq!(ChartStyle::from_token("candle"), Some(ChartStyle::Candlestick));
        assert_eq!(ChartStyle::from_token("RTX"), None);
    }

    #[test]
    fn test_unknown_style_is_line() {
        assert_eq!(ChartStyle::parse("pie"), ChartStyle::Line);
        assert_eq!(ChartStyle::parse("Candlestick"), ChartStyle::Candlestick);
    }

    #[test]
    fn test_tooltip_cells() {
        let tooltip = Tooltip {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            avg_price: 945.0,
            low_price: 890.0,
            high_price: 1000.0,
            listings: 5,
        };
        assert_eq!(
            tooltip.cells(),
            [
                "2024-01-01".to_string(),
                "$945.00".to_string(),
                "$890.00 - $1,000.00".to_string(),
                "5".to_string(),
            ]
        );
    }
}
