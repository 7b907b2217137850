//! Technical indicator calculators.
//!
//! Calculators work on plain `&[f64]` slices so the same SMA/EMA code can
//! smooth closes, the MACD line, or the ADL. Warm-up points are NaN.

pub mod adl;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use adl::adl_values;
pub use ema::ema_values;
pub use macd::macd_values;
pub use rsi::rsi_values;
pub use sma::rolling_mean;
