//! Derived indicator series: trailing moving average and daily returns.
//!
//! Indicator values share one representation:
//! - `IndicatorPoint`: one dated value with a warmup validity flag
//! - `IndicatorSeries`: one point per input price point
//! - `DerivedSeries`: the two series the dashboard chart needs

pub mod sma;
pub mod returns;

use crate::domain::error::MarketLensError;
use crate::domain::series::PriceSeries;
use chrono::NaiveDate;

pub const DEFAULT_WINDOW: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: f64,
}

#[derive(Debug, Clone, Default)]
pub struct IndicatorSeries {
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Points past warmup, in date order.
    pub fn valid_points(&self) -> impl Iterator<Item = &IndicatorPoint> {
        self.values.iter().filter(|p| p.valid)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DerivedSeries {
    pub moving_average: IndicatorSeries,
    pub daily_return: IndicatorSeries,
}

/// Derive both indicator series from the closing prices.
///
/// Pure function of the input series and window. A window longer than the
/// series is tolerated (every moving-average point stays invalid); a zero
/// window is a configuration error.
pub fn derive(series: &PriceSeries, window: usize) -> Result<DerivedSeries, MarketLensError> {
    if window == 0 {
        return Err(MarketLensError::InvalidWindow { window });
    }

    Ok(DerivedSeries {
        moving_average: sma::calculate_sma(series, window),
        daily_return: returns::calculate_daily_return(series),
    })
}
