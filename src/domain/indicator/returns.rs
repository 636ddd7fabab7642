//! Period-over-period fractional return of closing prices.
//!
//! return[i] = C[i] / C[i-1] - 1
//! Warmup: the first point is invalid (no prior close). A zero prior close
//! leaves the point invalid rather than dividing; undefined propagates.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries};
use crate::domain::series::PriceSeries;

pub fn calculate_daily_return(series: &PriceSeries) -> IndicatorSeries {
    let points = series.points();
    let mut values = Vec::with_capacity(points.len());

    for (i, point) in points.iter().enumerate() {
        let (valid, value) = if i == 0 {
            (false, 0.0)
        } else {
            let prev_close = points[i - 1].close;
            if prev_close == 0.0 {
                (false, 0.0)
            } else {
                (true, point.close / prev_close - 1.0)
            }
        };

        values.push(IndicatorPoint {
            date: point.date,
            valid,
            value,
        });
    }

    IndicatorSeries { values }
}
