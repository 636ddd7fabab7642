#![allow(dead_code)]

use chrono::NaiveDate;
use marketlens::domain::error::MarketLensError;
use marketlens::domain::series::{DateRange, PricePoint, PriceSeries};
use marketlens::ports::history_port::HistoryPort;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_point(date: NaiveDate, close: f64, volume: i64) -> PricePoint {
    PricePoint {
        date,
        open: close - 1.0,
        high: close + 2.0,
        low: close - 2.0,
        close,
        volume,
    }
}

/// `count` consecutive daily points starting at `start`, with closes taken
/// from a linear ramp beginning at `base`.
pub fn generate_points(start: NaiveDate, base: f64, count: usize) -> Vec<PricePoint> {
    (0..count)
        .map(|i| {
            make_point(
                start + chrono::Duration::days(i as i64),
                base + i as f64,
                1_000 + i as i64 * 10,
            )
        })
        .collect()
}

/// In-memory history port keyed by provider symbol. Unknown symbols answer
/// with `InvalidSymbol`, mirroring a provider 404.
pub struct MockHistoryPort {
    data: RefCell<HashMap<String, Vec<PricePoint>>>,
    pub calls: Cell<usize>,
}

impl MockHistoryPort {
    pub fn new() -> Self {
        Self {
            data: RefCell::new(HashMap::new()),
            calls: Cell::new(0),
        }
    }

    pub fn with_series(self, symbol: &str, points: Vec<PricePoint>) -> Self {
        self.data.borrow_mut().insert(symbol.to_string(), points);
        self
    }
}

impl HistoryPort for MockHistoryPort {
    fn fetch_history(
        &self,
        provider_symbol: &str,
        range: DateRange,
    ) -> Result<PriceSeries, MarketLensError> {
        self.calls.set(self.calls.get() + 1);
        match self.data.borrow().get(provider_symbol) {
            Some(points) => {
                let filtered: Vec<PricePoint> = points
                    .iter()
                    .filter(|p| range.contains(p.date))
                    .cloned()
                    .collect();
                Ok(PriceSeries::from_points(filtered))
            }
            None => Err(MarketLensError::InvalidSymbol {
                symbol: provider_symbol.to_string(),
                reason: "HTTP 404".into(),
            }),
        }
    }
}
