use chrono::{DateTime, NaiveTime, Utc};

use crate::models::{
    AreaFill, AxisDomain, BarMark, ChartOutcome, ChartSpec, ChartStyle, DailySummary, Encoding,
    RangeMark, RawObservation, SeriesPoint, TimeRange, Tooltip, Trend, ViewState,
};
use crate::services::aggregate_service;

/// Curve samples drawn between two neighbouring dates
const SEGMENT_SAMPLES: usize = 16;

/// Headroom/footroom applied to the value axis
const DOMAIN_PADDING: f64 = 0.05;

/// Keep the summaries whose date (midnight UTC) is at or after `now - range`
pub fn filter_by_range_at(
    summaries: &[DailySummary],
    range: TimeRange,
    now: DateTime<Utc>,
) -> Vec<DailySummary> {
    let Some(duration) = range.duration() else {
        return summaries.to_vec();
    };

    let cutoff = (now - duration).naive_utc();
    summaries
        .iter()
        .filter(|s| s.date.and_time(NaiveTime::MIN) >= cutoff)
        .cloned()
        .collect()
}

/// Value-axis domain over summaries that are all plottable
pub fn axis_domain(summaries: &[DailySummary]) -> Option<AxisDomain> {
    if summaries.is_empty() {
        return None;
    }

    let min_low = summaries
        .iter()
        .map(|s| s.low_price)
        .fold(f64::INFINITY, f64::min);
    let max_high = summaries
        .iter()
        .map(|s| s.high_price)
        .fold(f64::NEG_INFINITY, f64::max);

    Some(AxisDomain {
        min: (min_low * (1.0 - DOMAIN_PADDING)).floor(),
        max: (max_high * (1.0 + DOMAIN_PADDING)).ceil(),
    })
}

/// Build the chart description for already-aggregated summaries
///
/// Summaries with a non-finite price are dropped first; if nothing is left
/// the result is [`ChartOutcome::NoData`].
pub fn build_chart(summaries: &[DailySummary], style: ChartStyle) -> ChartOutcome {
    let valid: Vec<&DailySummary> = summaries.iter().filter(|s| s.is_plottable()).collect();

    if valid.len() < summaries.len() {
        tracing::debug!(
            "Dropped {} summaries with non-finite prices",
            summaries.len() - valid.len()
        );
    }

    if valid.is_empty() {
        return ChartOutcome::NoData;
    }

    let owned: Vec<DailySummary> = valid.into_iter().cloned().collect();
    let domain = match axis_domain(&owned) {
        Some(domain) => domain,
        None => return ChartOutcome::NoData,
    };

    let encoding = match style {
        ChartStyle::Line => {
            let markers = average_series(&owned);
            let curve = monotone_curve(&markers, SEGMENT_SAMPLES);
            Encoding::Line { markers, curve }
        }
        ChartStyle::Area => {
            let markers = average_series(&owned);
            let curve = monotone_curve(&markers, SEGMENT_SAMPLES);
            Encoding::Area {
                markers,
                curve,
                fill: AreaFill {
                    baseline: domain.min,
                    top_opacity: 0.8,
                    bottom_opacity: 0.0,
                },
            }
        }
        ChartStyle::Bar => Encoding::Bar {
            bars: owned
                .iter()
                .map(|s| BarMark {
                    date: s.date,
                    height: s.avg_price,
                })
                .collect(),
        },
        ChartStyle::Candlestick => Encoding::Candlestick {
            ranges: range_marks(&owned),
        },
    };

    ChartOutcome::Chart(ChartSpec {
        style,
        dates: owned.iter().map(|s| s.date).collect(),
        domain,
        encoding,
        tooltips: owned.iter().map(tooltip).collect(),
    })
}

/// Full pipeline: aggregate by day, trim to the view's range, then build
pub fn price_history_chart(
    observations: &[RawObservation],
    view: &ViewState,
    now: DateTime<Utc>,
) -> ChartOutcome {
    let daily = aggregate_service::aggregate(observations);
    let filtered = filter_by_range_at(&daily, view.range, now);
    tracing::info!(
        "Charting {}: {} days, {} in range {} ({})",
        view.model,
        daily.len(),
        filtered.len(),
        view.range.as_str(),
        view.style.as_str()
    );
    build_chart(&filtered, view.style)
}

fn tooltip(summary: &DailySummary) -> Tooltip {
    Tooltip {
        date: summary.date,
        avg_price: summary.avg_price,
        low_price: summary.low_price,
        high_price: summary.high_price,
        listings: summary.listings,
    }
}

fn average_series(summaries: &[DailySummary]) -> Vec<SeriesPoint> {
    summaries
        .iter()
        .enumerate()
        .map(|(i, s)| SeriesPoint {
            x: i as f64,
            value: s.avg_price,
        })
        .collect()
}

/// Trend of each date against the previous one. The first date is compared
/// with itself, so it always counts as non-decreasing.
fn range_marks(summaries: &[DailySummary]) -> Vec<RangeMark> {
    summaries
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let prev_avg = if i > 0 { summaries[i - 1].avg_price } else { s.avg_price };
            let trend = if s.avg_price >= prev_avg {
                Trend::NonDecreasing
            } else {
                Trend::Decreasing
            };
            RangeMark {
                date: s.date,
                low: s.low_price,
                high: s.high_price,
                avg: s.avg_price,
                trend,
            }
        })
        .collect()
}

/// Sample a monotone cubic (Fritsch-Carlson) through the points
///
/// Between two neighbouring points the curve never leaves the band spanned by
/// their values, so no spurious peaks or dips appear.
pub fn monotone_curve(points: &[SeriesPoint], samples_per_segment: usize) -> Vec<SeriesPoint> {
    let n = points.len();
    if n < 2 {
        return points.to_vec();
    }
    let samples = samples_per_segment.max(1);

    let secants: Vec<f64> = points
        .windows(2)
        .map(|w| (w[1].value - w[0].value) / (w[1].x - w[0].x))
        .collect();

    let mut tangents = vec![0.0; n];
    tangents[0] = secants[0];
    tangents[n - 1] = secants[n - 2];
    for i in 1..n - 1 {
        tangents[i] = if secants[i - 1] * secants[i] <= 0.0 {
            0.0
        } else {
            (secants[i - 1] + secants[i]) / 2.0
        };
    }

    for k in 0..n - 1 {
        if secants[k] == 0.0 {
            tangents[k] = 0.0;
            tangents[k + 1] = 0.0;
            continue;
        }
        let a = tangents[k] / secants[k];
        let b = tangents[k + 1] / secants[k];
        let norm = a * a + b * b;
        if norm > 9.0 {
            let t = 3.0 / norm.sqrt();
            tangents[k] = t * a * secants[k];
            tangents[k + 1] = t * b * secants[k];
        }
    }

    let mut curve = Vec::with_capacity((n - 1) * samples + 1);
    for k in 0..n - 1 {
        let (p0, p1) = (points[k], points[k + 1]);
        let h = p1.x - p0.x;
        for step in 0..samples {
            let t = step as f64 / samples as f64;
            let t2 = t * t;
            let t3 = t2 * t;
            let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
            let h10 = t3 - 2.0 * t2 + t;
            let h01 = -2.0 * t3 + 3.0 * t2;
            let h11 = t3 - t2;
            curve.push(SeriesPoint {
                x: p0.x + t * h,
                value: h00 * p0.value
                    + h10 * h * tangents[k]
                    + h01 * p1.value
                    + h11 * h * tangents[k + 1],
            });
        }
    }
    curve.push(points[n - 1]);

    curve
}
