//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//!
//! Default parameters: fast=12, slow=26, signal=9
//! Warmup: the line is defined from index max(fast, slow) - 1; the signal
//! from max(fast, slow) - 1 + signal - 1 (index 33 for the defaults).

use crate::domain::indicator::ema_values;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// MACD line and signal line as raw vectors, NaN during warm-up.
pub fn macd_values(closes: &[f64], fast: usize, slow: usize, signal: usize) -> (Vec<f64>, Vec<f64>) {
    let ema_fast = ema_values(closes, fast);
    let ema_slow = ema_values(closes, slow);

    let line: Vec<f64> = ema_fast
        .iter()
        .zip(ema_slow.iter())
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema_values(&line, signal);
    (line, signal_line)
}
