//! Market-data access port trait.

use crate::domain::error::MarketLensError;
use crate::domain::series::{DateRange, PriceSeries};

/// One logical call against the external provider's historical-quotes
/// endpoint, closed interval `[range.start, range.end]`.
///
/// An empty result is success (delisted symbol, holiday-only range), not an
/// error. Implementations do not retry; retry policy belongs to the caller.
pub trait HistoryPort {
    fn fetch_history(
        &self,
        provider_symbol: &str,
        range: DateRange,
    ) -> Result<PriceSeries, MarketLensError>;
}
