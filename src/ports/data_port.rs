//! Price data access port trait.

use crate::domain::error::TraderError;
use crate::domain::ohlcv::Bar;
use crate::domain::ticker::Lookback;

pub trait DataPort {
    /// Daily bars for `ticker`, oldest first, limited to the `lookback`
    /// window ending at the most recent available bar.
    fn fetch_ohlcv(&self, ticker: &str, lookback: Lookback) -> Result<Vec<Bar>, TraderError>;

    fn list_tickers(&self) -> Result<Vec<String>, TraderError>;
}
