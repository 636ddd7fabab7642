//! Trailing simple moving average of closing prices.
//!
//! SMA(n)[i] = mean(C[i-n+1..=i])
//! O(n) sliding window sum. Warmup: first (n-1) points are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries};
use crate::domain::series::PriceSeries;

pub fn calculate_sma(series: &PriceSeries, window: usize) -> IndicatorSeries {
    if window == 0 || series.is_empty() {
        return IndicatorSeries { values: Vec::new() };
    }

    let points = series.points();
    let mut values = Vec::with_capacity(points.len());
    let mut window_sum: f64 = 0.0;

    for (i, point) in points.iter().enumerate() {
        window_sum += point.close;
        if i >= window {
            window_sum -= points[i - window].close;
        }

        let valid = i >= window - 1;
        let sma = if valid { window_sum / window as f64 } else { 0.0 };

        values.push(IndicatorPoint {
            date: point.date,
            valid,
            value: sma,
        });
    }

    IndicatorSeries { values }
}
