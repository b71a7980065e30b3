//! Raw price observation models

use chrono::{NaiveDate, NaiveDateTime};

/// One reported price sample for a GPU model
#[derive(Debug, Clone, PartialEq)]
pub struct RawObservation {
    pub observed_at: NaiveDateTime,
    pub low_price: f64,
    pub high_price: f64,
    pub avg_price: f64,
    pub listings: u32,
}

impl RawObservation {
    pub fn new(
        observed_at: NaiveDateTime,
        low_price: f64,
        high_price: f64,
        avg_price: f64,
        listings: u32,
    ) -> Self {
        Self {
            observed_at,
            low_price,
            high_price,
            avg_price,
            listings,
        }
    }

    /// Calendar day this observation is grouped under
    pub fn day(&self) -> NaiveDate {
        self.observed_at.date()
    }
}
