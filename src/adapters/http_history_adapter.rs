//! HTTP market-data adapter.
//!
//! Issues one GET per fetch against a stooq-style daily-history endpoint
//! that answers with CSV (`Date,Open,High,Low,Close,Volume`). Rows outside
//! the requested closed interval are dropped; the result is sorted and
//! deduplicated. No caching and no retries live here.

use crate::domain::error::MarketLensError;
use crate::domain::series::{DateRange, PricePoint, PriceSeries};
use crate::ports::config_port::ConfigPort;
use crate::ports::history_port::HistoryPort;
use chrono::NaiveDate;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://stooq.com/q/d/l/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct HttpHistoryAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpHistoryAdapter {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MarketLensError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("marketlens/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| MarketLensError::ProviderUnavailable {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, MarketLensError> {
        let base_url = config
            .get_string("provider", "base_url")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs =
            config.get_int("provider", "timeout_secs", DEFAULT_TIMEOUT_SECS as i64);
        Self::new(base_url, Duration::from_secs(timeout_secs.max(1) as u64))
    }
}

impl HistoryPort for HttpHistoryAdapter {
    fn fetch_history(
        &self,
        provider_symbol: &str,
        range: DateRange,
    ) -> Result<PriceSeries, MarketLensError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("s", provider_symbol),
                ("d1", &range.start().format("%Y%m%d").to_string()),
                ("d2", &range.end().format("%Y%m%d").to_string()),
                ("i", "d"),
            ])
            .send()
            .map_err(|e| MarketLensError::ProviderUnavailable {
                reason: format!("request for {provider_symbol} failed: {e}"),
            })?;

        let status = response.status();
        if status.is_client_error() {
            return Err(MarketLensError::InvalidSymbol {
                symbol: provider_symbol.to_string(),
                reason: format!("HTTP {status}"),
            });
        }
        if !status.is_success() {
            return Err(MarketLensError::ProviderUnavailable {
                reason: format!("HTTP {status} for {provider_symbol}"),
            });
        }

        let body = response
            .text()
            .map_err(|e| MarketLensError::ProviderUnavailable {
                reason: format!("failed to read response body: {e}"),
            })?;

        parse_history_csv(&body, range)
    }
}

/// Parse the provider's CSV payload into a series, keeping only rows inside
/// the requested range. A payload with no data rows (including the
/// provider's bare "No data" answer) is an empty series, not an error.
pub(crate) fn parse_history_csv(
    body: &str,
    range: DateRange,
) -> Result<PriceSeries, MarketLensError> {
    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let mut points = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| MarketLensError::ProviderUnavailable {
            reason: format!("malformed provider response: {e}"),
        })?;

        let date_str = field(&record, 0, "date")?;
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
            MarketLensError::ProviderUnavailable {
                reason: format!("invalid date in provider response: {e}"),
            }
        })?;

        if !range.contains(date) {
            continue;
        }

        points.push(PricePoint {
            date,
            open: parse_number(&record, 1, "open")?,
            high: parse_number(&record, 2, "high")?,
            low: parse_number(&record, 3, "low")?,
            close: parse_number(&record, 4, "close")?,
            // Some instruments (yields, currency pairs) report no volume.
            volume: record
                .get(5)
                .filter(|v| !v.is_empty())
                .map(|v| {
                    v.parse().map_err(|e| MarketLensError::ProviderUnavailable {
                        reason: format!("invalid volume value: {e}"),
                    })
                })
                .transpose()?
                .unwrap_or(0),
        });
    }

    Ok(PriceSeries::from_points(points))
}

fn field<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<&'r str, MarketLensError> {
    record
        .get(index)
        .ok_or_else(|| MarketLensError::ProviderUnavailable {
            reason: format!("missing {name} column in provider response"),
        })
}

fn parse_number(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<f64, MarketLensError> {
    field(record, index, name)?
        .parse()
        .map_err(|e| MarketLensError::ProviderUnavailable {
            reason: format!("invalid {name} value: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(
            NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
            NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn parses_daily_rows() {
        let body = "Date,Open,High,Low,Close,Volume\n\
            2024-01-15,100.0,110.0,90.0,105.0,50000\n\
            2024-01-16,105.0,115.0,100.0,110.0,60000\n";

        let series = parse_history_csv(body, range("2024-01-01", "2024-01-31")).unwrap();

        assert_eq!(series.len(), 2);
        let first = &series.points()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(first.open, 100.0);
        assert_eq!(first.close, 105.0);
        assert_eq!(first.volume, 50000);
    }

    #[test]
    fn drops_rows_outside_range() {
        let body = "Date,Open,High,Low,Close,Volume\n\
            2023-12-29,90.0,95.0,85.0,92.0,1000\n\
            2024-01-15,100.0,110.0,90.0,105.0,50000\n\
            2024-02-02,120.0,125.0,115.0,121.0,2000\n";

        let series = parse_history_csv(body, range("2024-01-01", "2024-01-31")).unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(
            series.points()[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn sorts_and_deduplicates() {
        let body = "Date,Open,High,Low,Close,Volume\n\
            2024-01-16,105.0,115.0,100.0,110.0,60000\n\
            2024-01-15,100.0,110.0,90.0,105.0,50000\n\
            2024-01-15,999.0,999.0,999.0,999.0,999\n";

        let series = parse_history_csv(body, range("2024-01-01", "2024-01-31")).unwrap();

        assert_eq!(series.len(), 2);
        // First row seen for a duplicated date wins.
        assert_eq!(
            series.points()[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(series.points()[0].close, 105.0);
        assert_eq!(series.points()[1].close, 110.0);
    }

    #[test]
    fn missing_volume_defaults_to_zero() {
        let body = "Date,Open,High,Low,Close,Volume\n\
            2024-01-15,1.34,1.36,1.33,1.35,\n";

        let series = parse_history_csv(body, range("2024-01-01", "2024-01-31")).unwrap();
        assert_eq!(series.points()[0].volume, 0);
    }

    #[test]
    fn no_data_answer_is_empty_series() {
        let series = parse_history_csv("No data", range("2024-01-01", "2024-01-31")).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn header_only_is_empty_series() {
        let series = parse_history_csv(
            "Date,Open,High,Low,Close,Volume\n",
            range("2024-01-01", "2024-01-31"),
        )
        .unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn garbage_close_is_provider_error() {
        let body = "Date,Open,High,Low,Close,Volume\n\
            2024-01-15,100.0,110.0,90.0,oops,50000\n";

        let result = parse_history_csv(body, range("2024-01-01", "2024-01-31"));
        assert!(matches!(
            result,
            Err(MarketLensError::ProviderUnavailable { .. })
        ));
    }

    #[test]
    fn adapter_builds_from_defaults() {
        let adapter =
            HttpHistoryAdapter::new(DEFAULT_BASE_URL, Duration::from_secs(5)).unwrap();
        assert_eq!(adapter.base_url, DEFAULT_BASE_URL);
    }
}
