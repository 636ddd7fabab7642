//! Daily price-bar representation and the validated date range.

use crate::domain::error::MarketLensError;
use chrono::NaiveDate;
use serde::Serialize;

/// Closed date interval. Construction enforces `start <= end`; an inverted
/// range is a validation error, never a fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, MarketLensError> {
        if start > end {
            return Err(MarketLensError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// One daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Ordered daily series for one instrument over one date range.
///
/// Ascending by date with no duplicate dates; both invariants are restored
/// at construction so downstream code can rely on them. Owned by a single
/// pipeline run and dropped afterwards.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from provider rows: sorts ascending by date and keeps
    /// the first row seen for any duplicated date.
    pub fn from_points(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        Self { points }
    }

    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
