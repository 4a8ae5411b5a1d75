//! Data types produced by the listing analyses.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Price and overall satisfaction of one reviewed listing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceSatisfaction {
    pub price: f64,
    pub satisfaction: f64,
}

/// Room with the largest relative price movement across snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceChange {
    pub room_id: i64,
    /// Absolute change from first to last price, in percent.
    pub change_pct: f64,
    pub start_price: f64,
    pub end_price: f64,
}

/// One bucket of the host listing-count histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistogramBucket {
    pub listings: usize,
    pub hosts: usize,
}

/// Average "Entire home/apt" price for a neighborhood.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborhoodPrice {
    pub neighborhood: String,
    pub average_price: f64,
}

/// Summary of one room's price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoomSeriesRow {
    pub room_id: i64,
    pub observations: usize,
    pub first_price: f64,
    pub last_price: f64,
}

/// A correlation result as appended to a report CSV.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationRecord {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub points: usize,
    pub coefficient: f64,
    pub p_value: f64,
}
