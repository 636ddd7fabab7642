//! CSV export of a selected column subset of a price series.
//!
//! Output is UTF-8, header row first, one row per price point in ascending
//! date order. Numbers are written with their full native precision so the
//! same input always produces byte-identical output.

use crate::domain::error::MarketLensError;
use crate::domain::indicator::DerivedSeries;
use crate::domain::series::PriceSeries;

/// Exportable columns: the raw bar fields plus the derived indicator columns
/// present in the in-memory table at export time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date,
    Open,
    High,
    Low,
    Close,
    Volume,
    MovingAverage,
    DailyReturn,
}

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::Open => "Open",
            Column::High => "High",
            Column::Low => "Low",
            Column::Close => "Close",
            Column::Volume => "Volume",
            Column::MovingAverage => "Moving Average",
            Column::DailyReturn => "Daily Return",
        }
    }

    pub fn is_derived(&self) -> bool {
        matches!(self, Column::MovingAverage | Column::DailyReturn)
    }

    /// Parse a user-supplied column name. Case-insensitive; spaces and
    /// underscores are ignored so "Moving Average", "moving_average" and
    /// "MovingAverage" all resolve to the same column.
    pub fn parse(name: &str) -> Result<Self, MarketLensError> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != ' ' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "date" => Ok(Column::Date),
            "open" => Ok(Column::Open),
            "high" => Ok(Column::High),
            "low" => Ok(Column::Low),
            "close" => Ok(Column::Close),
            "volume" => Ok(Column::Volume),
            "movingaverage" => Ok(Column::MovingAverage),
            "dailyreturn" => Ok(Column::DailyReturn),
            _ => Err(MarketLensError::UnknownColumn {
                name: name.to_string(),
            }),
        }
    }
}

/// Parse a comma-separated column selection.
pub fn parse_columns(input: &str) -> Result<Vec<Column>, MarketLensError> {
    input.split(',').map(|s| Column::parse(s.trim())).collect()
}

/// Default download file name for an instrument's export.
pub fn default_file_name(display_name: &str) -> String {
    format!("{display_name}_data.csv")
}

/// Serialize the selected columns to CSV bytes.
///
/// Derived columns require `derived`; requesting one without it fails with
/// `UnknownColumn` since that column is not part of the table being exported.
/// Derived warmup points render as empty cells.
pub fn to_csv_bytes(
    series: &PriceSeries,
    derived: Option<&DerivedSeries>,
    columns: &[Column],
) -> Result<Vec<u8>, MarketLensError> {
    for column in columns {
        if column.is_derived() && derived.is_none() {
            return Err(MarketLensError::UnknownColumn {
                name: column.header().to_string(),
            });
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(columns.iter().map(|c| c.header()))
        .map_err(csv_io_error)?;

    for (i, point) in series.points().iter().enumerate() {
        let record: Vec<String> = columns
            .iter()
            .map(|column| match column {
                Column::Date => point.date.format("%Y-%m-%d").to_string(),
                Column::Open => point.open.to_string(),
                Column::High => point.high.to_string(),
                Column::Low => point.low.to_string(),
                Column::Close => point.close.to_string(),
                Column::Volume => point.volume.to_string(),
                Column::MovingAverage => derived
                    .and_then(|d| d.moving_average.values.get(i))
                    .filter(|p| p.valid)
                    .map(|p| p.value.to_string())
                    .unwrap_or_default(),
                Column::DailyReturn => derived
                    .and_then(|d| d.daily_return.values.get(i))
                    .filter(|p| p.valid)
                    .map(|p| p.value.to_string())
                    .unwrap_or_default(),
            })
            .collect();

        writer.write_record(&record).map_err(csv_io_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| MarketLensError::Io(std::io::Error::other(e)))
}

fn csv_io_error(err: csv::Error) -> MarketLensError {
    MarketLensError::Io(std::io::Error::other(err))
}
