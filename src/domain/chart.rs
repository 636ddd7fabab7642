//! Two-panel chart specification.
//!
//! The composer emits a declarative description for an external renderer:
//! panel 1 overlays the closing price (solid) with its moving average
//! (dotted); panel 2 carries the daily return. Both panels share the date
//! axis. Warmup indicator points are omitted from their traces, never
//! plotted as zero.

use crate::domain::indicator::{DerivedSeries, IndicatorSeries};
use crate::domain::series::PriceSeries;
use chrono::NaiveDate;
use serde::Serialize;

pub const DEFAULT_PRICE_PANEL_FRACTION: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TracePoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    pub name: String,
    pub line: LineStyle,
    pub points: Vec<TracePoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Panel {
    pub title: String,
    pub y_axis_label: String,
    pub height_fraction: f64,
    pub traces: Vec<Trace>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_axis_label: String,
    pub panels: Vec<Panel>,
}

/// Assemble the two-panel specification.
///
/// `price_axis_label` names the instrument's native unit (price, rate, yield
/// or index value); it is supplied by the caller, never inferred here. An
/// empty series yields a valid spec whose traces carry zero points.
pub fn compose(
    series: &PriceSeries,
    derived: &DerivedSeries,
    title: &str,
    price_axis_label: &str,
    price_panel_fraction: f64,
) -> ChartSpec {
    let fraction = price_panel_fraction.clamp(0.1, 0.9);

    let close_trace = Trace {
        name: format!("{title} Price"),
        line: LineStyle::Solid,
        points: series
            .points()
            .iter()
            .map(|p| TracePoint {
                date: p.date,
                value: p.close,
            })
            .collect(),
    };

    let ma_trace = Trace {
        name: format!("{title} Moving Average"),
        line: LineStyle::Dotted,
        points: indicator_points(&derived.moving_average),
    };

    let return_trace = Trace {
        name: format!("{title} Daily Return"),
        line: LineStyle::Solid,
        points: indicator_points(&derived.daily_return),
    };

    ChartSpec {
        title: format!("{title} Price and Returns"),
        x_axis_label: "Date".to_string(),
        panels: vec![
            Panel {
                title: title.to_string(),
                y_axis_label: price_axis_label.to_string(),
                height_fraction: fraction,
                traces: vec![close_trace, ma_trace],
            },
            Panel {
                title: format!("{title} Daily Return"),
                y_axis_label: "Daily Return".to_string(),
                height_fraction: 1.0 - fraction,
                traces: vec![return_trace],
            },
        ],
    }
}

fn indicator_points(series: &IndicatorSeries) -> Vec<TracePoint> {
    series
        .valid_points()
        .map(|p| TracePoint {
            date: p.date,
            value: p.value,
        })
        .collect()
}
