//! The generic per-request analytics pipeline.
//!
//! One synchronous run per user interaction: validate, resolve, fetch,
//! derive, compose. Every failure surfaces to the caller; no partial
//! snapshot is ever produced and no default data is substituted. The
//! snapshot owns its series and is dropped once rendered or exported, so
//! nothing is shared across requests.

use crate::domain::chart::{self, ChartSpec, DEFAULT_PRICE_PANEL_FRACTION};
use crate::domain::error::MarketLensError;
use crate::domain::indicator::{self, DerivedSeries, DEFAULT_WINDOW};
use crate::domain::instrument::{AssetClass, Catalog, Instrument};
use crate::domain::series::{DateRange, PriceSeries};
use crate::ports::history_port::HistoryPort;
use chrono::NaiveDate;

/// Request-scoped parameters, carried explicitly instead of ambient state.
#[derive(Debug, Clone)]
pub struct SnapshotRequest {
    pub asset_class: AssetClass,
    pub display_name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub window: usize,
    pub price_axis_label: String,
    pub price_panel_fraction: f64,
}

impl SnapshotRequest {
    pub fn new(
        asset_class: AssetClass,
        display_name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            asset_class,
            display_name: display_name.into(),
            start,
            end,
            window: DEFAULT_WINDOW,
            price_axis_label: "Price".to_string(),
            price_panel_fraction: DEFAULT_PRICE_PANEL_FRACTION,
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_price_axis_label(mut self, label: impl Into<String>) -> Self {
        self.price_axis_label = label.into();
        self
    }
}

/// Everything one dashboard interaction renders or exports.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub instrument: Instrument,
    pub series: PriceSeries,
    pub derived: DerivedSeries,
    pub chart: ChartSpec,
}

/// Run the pipeline for one request.
///
/// All validation happens before the provider is contacted: an inverted
/// date range, an unknown instrument or a zero window never issue a fetch.
pub fn run(
    history: &dyn HistoryPort,
    request: &SnapshotRequest,
) -> Result<Snapshot, MarketLensError> {
    let range = DateRange::new(request.start, request.end)?;
    if request.window == 0 {
        return Err(MarketLensError::InvalidWindow {
            window: request.window,
        });
    }
    let instrument = Catalog::resolve(request.asset_class, &request.display_name)?;

    let series = history.fetch_history(instrument.provider_symbol, range)?;
    let derived = indicator::derive(&series, request.window)?;
    let chart = chart::compose(
        &series,
        &derived,
        instrument.display_name,
        &request.price_axis_label,
        request.price_panel_fraction,
    );

    Ok(Snapshot {
        instrument,
        series,
        derived,
        chart,
    })
}
