//! Domain error types.
//!
//! Validation errors stop the pipeline before any provider call is made.
//! `ProviderUnavailable` is transient and may be retried by the caller;
//! `InvalidSymbol` is permanent for that symbol and must not be retried.

use chrono::NaiveDate;

/// Top-level error type for marketlens.
#[derive(Debug, thiserror::Error)]
pub enum MarketLensError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("unknown instrument \"{name}\" in {asset_class} catalog")]
    UnknownInstrument { name: String, asset_class: String },

    #[error("unknown export column \"{name}\"")]
    UnknownColumn { name: String },

    #[error("invalid moving-average window: {window} (must be at least 1)")]
    InvalidWindow { window: usize },

    #[error("provider rejected symbol {symbol}: {reason}")]
    InvalidSymbol { symbol: String, reason: String },

    #[error("provider unavailable: {reason}")]
    ProviderUnavailable { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MarketLensError {
    /// Transient errors are worth retrying; everything else is not.
    pub fn is_transient(&self) -> bool {
        matches!(self, MarketLensError::ProviderUnavailable { .. })
    }
}

impl From<&MarketLensError> for std::process::ExitCode {
    fn from(err: &MarketLensError) -> Self {
        let code: u8 = match err {
            MarketLensError::Io(_) => 1,
            MarketLensError::InvalidDateRange { .. }
            | MarketLensError::UnknownInstrument { .. }
            | MarketLensError::UnknownColumn { .. }
            | MarketLensError::InvalidWindow { .. } => 2,
            MarketLensError::ProviderUnavailable { .. } => 3,
            MarketLensError::InvalidSymbol { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_not_transient() {
        let err = MarketLensError::UnknownInstrument {
            name: "Dogecoin".into(),
            asset_class: "crypto".into(),
        };
        assert!(!err.is_transient());

        let err = MarketLensError::InvalidWindow { window: 0 };
        assert!(!err.is_transient());
    }

    #[test]
    fn provider_unavailable_is_transient() {
        let err = MarketLensError::ProviderUnavailable {
            reason: "connection refused".into(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn invalid_symbol_is_not_transient() {
        let err = MarketLensError::InvalidSymbol {
            symbol: "NOPE".into(),
            reason: "404".into(),
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn date_range_error_message_names_both_dates() {
        let err = MarketLensError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2024-03-01"));
        assert!(msg.contains("2024-02-01"));
    }
}
