use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{DailySummary, RawObservation};

/// Running totals for one calendar day
struct DayAccumulator {
    low_price: f64,
    high_price: f64,
    avg_sum: f64,
    count: usize,
    listings: u32,
}

/// Collapse raw observations into one summary per calendar day
///
/// Per day: lowest low, highest high, mean of the averages, and the listing
/// count of the last observation seen for that day in input order. Output is
/// ascending by date whatever the input order.
pub fn aggregate(observations: &[RawObservation]) -> Vec<DailySummary> {
    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();

    for obs in observations {
        days.entry(obs.day())
            .and_modify(|acc| {
                acc.low_price = nan_min(acc.low_price, obs.low_price);
                acc.high_price = nan_max(acc.high_price, obs.high_price);
                acc.avg_sum += obs.avg_price;
                acc.count += 1;
                acc.listings = obs.listings;
            })
            .or_insert(DayAccumulator {
                low_price: obs.low_price,
                high_price: obs.high_price,
                avg_sum: obs.avg_price,
                count: 1,
                listings: obs.listings,
            });
    }

    tracing::debug!(
        "Aggregated {} observations into {} days",
        observations.len(),
        days.len()
    );

    days.into_iter()
        .map(|(date, acc)| DailySummary {
            date,
            low_price: acc.low_price,
            high_price: acc.high_price,
            avg_price: acc.avg_sum / acc.count as f64,
            listings: acc.listings,
        })
        .collect()
}

// f64::min/max skip NaN; a malformed price has to poison the day instead so
// the renderer's finiteness check removes it.
fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}
