//! Bounded-retry wrapper around a history port.
//!
//! Retries transient provider failures with exponential backoff. Permanent
//! failures (`InvalidSymbol`) and validation errors pass through untouched
//! on the first attempt.

use crate::domain::error::MarketLensError;
use crate::domain::series::{DateRange, PriceSeries};
use crate::ports::config_port::ConfigPort;
use crate::ports::history_port::HistoryPort;
use std::thread;
use std::time::Duration;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_MS: u64 = 200;

pub struct RetryingHistory<P> {
    inner: P,
    max_retries: u32,
    base_backoff: Duration,
}

impl<P: HistoryPort> RetryingHistory<P> {
    pub fn new(inner: P, max_retries: u32, base_backoff: Duration) -> Self {
        Self {
            inner,
            max_retries,
            base_backoff,
        }
    }

    pub fn from_config(inner: P, config: &dyn ConfigPort) -> Self {
        let max_retries = config
            .get_int("provider", "max_retries", DEFAULT_MAX_RETRIES as i64)
            .max(0) as u32;
        let backoff_ms = config
            .get_int("provider", "backoff_ms", DEFAULT_BACKOFF_MS as i64)
            .max(0) as u64;
        Self::new(inner, max_retries, Duration::from_millis(backoff_ms))
    }

    /// Delay before retry `attempt` (0-based): base * 2^attempt.
    fn delay(&self, attempt: u32) -> Duration {
        self.base_backoff * 2u32.saturating_pow(attempt)
    }
}

impl<P: HistoryPort> HistoryPort for RetryingHistory<P> {
    fn fetch_history(
        &self,
        provider_symbol: &str,
        range: DateRange,
    ) -> Result<PriceSeries, MarketLensError> {
        let mut attempt = 0;
        loop {
            match self.inner.fetch_history(provider_symbol, range) {
                Ok(series) => return Ok(series),
                Err(err) if err.is_transient() && attempt < self.max_retries => {
                    eprintln!(
                        "warning: {err}; retrying {provider_symbol} ({} of {})",
                        attempt + 1,
                        self.max_retries
                    );
                    thread::sleep(self.delay(attempt));
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::PricePoint;
    use chrono::NaiveDate;
    use std::cell::Cell;

    struct FlakyHistory {
        failures_before_success: usize,
        calls: Cell<usize>,
        permanent: bool,
    }

    impl FlakyHistory {
        fn transient(failures_before_success: usize) -> Self {
            Self {
                failures_before_success,
                calls: Cell::new(0),
                permanent: false,
            }
        }

        fn permanent() -> Self {
            Self {
                failures_before_success: usize::MAX,
                calls: Cell::new(0),
                permanent: true,
            }
        }
    }

    impl HistoryPort for FlakyHistory {
        fn fetch_history(
            &self,
            symbol: &str,
            _range: DateRange,
        ) -> Result<PriceSeries, MarketLensError> {
            let call = self.calls.get();
            self.calls.set(call + 1);

            if self.permanent {
                return Err(MarketLensError::InvalidSymbol {
                    symbol: symbol.to_string(),
                    reason: "HTTP 404".into(),
                });
            }
            if call < self.failures_before_success {
                return Err(MarketLensError::ProviderUnavailable {
                    reason: "connection reset".into(),
                });
            }
            Ok(PriceSeries::from_points(vec![PricePoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                open: 100.0,
                high: 110.0,
                low: 90.0,
                close: 105.0,
                volume: 1000,
            }]))
        }
    }

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn succeeds_after_transient_failures() {
        let history = RetryingHistory::new(
            FlakyHistory::transient(2),
            3,
            Duration::from_millis(1),
        );

        let series = history.fetch_history("BTC-USD", range()).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(history.inner.calls.get(), 3);
    }

    #[test]
    fn gives_up_after_max_retries() {
        let history = RetryingHistory::new(
            FlakyHistory::transient(10),
            2,
            Duration::from_millis(1),
        );

        let result = history.fetch_history("BTC-USD", range());
        assert!(matches!(
            result,
            Err(MarketLensError::ProviderUnavailable { .. })
        ));
        // Initial attempt plus two retries.
        assert_eq!(history.inner.calls.get(), 3);
    }

    #[test]
    fn permanent_errors_are_not_retried() {
        let history = RetryingHistory::new(
            FlakyHistory::permanent(),
            5,
            Duration::from_millis(1),
        );

        let result = history.fetch_history("NOPE", range());
        assert!(matches!(result, Err(MarketLensError::InvalidSymbol { .. })));
        assert_eq!(history.inner.calls.get(), 1);
    }

    #[test]
    fn zero_retries_means_single_attempt() {
        let history = RetryingHistory::new(
            FlakyHistory::transient(1),
            0,
            Duration::from_millis(1),
        );

        let result = history.fetch_history("BTC-USD", range());
        assert!(result.is_err());
        assert_eq!(history.inner.calls.get(), 1);
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let history = RetryingHistory::new(
            FlakyHistory::transient(0),
            3,
            Duration::from_millis(100),
        );

        assert_eq!(history.delay(0), Duration::from_millis(100));
        assert_eq!(history.delay(1), Duration::from_millis(200));
        assert_eq!(history.delay(2), Duration::from_millis(400));
    }
}
