//! Indicator pipeline: raw bars to augmented bars.
//!
//! Every derived field is computed causally and is NaN while its window is
//! still warming up. The output has exactly one `AugmentedBar` per input bar.

use super::error::TraderError;
use super::indicator::adl::adl_values;
use super::indicator::macd::{macd_values, DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};
use super::indicator::rsi::{rsi_values, DEFAULT_PERIOD as RSI_PERIOD};
use super::indicator::rolling_mean;
use super::ohlcv::{validate_bars, Bar};

/// Caller-supplied rolling window sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorWindows {
    pub sma_short: usize,
    pub sma_long: usize,
    pub adl_short: usize,
    pub adl_long: usize,
}

impl Default for IndicatorWindows {
    fn default() -> Self {
        IndicatorWindows {
            sma_short: 7,
            sma_long: 10,
            adl_short: 19,
            adl_long: 25,
        }
    }
}

impl IndicatorWindows {
    pub fn validate(&self) -> Result<(), TraderError> {
        for (name, window) in [
            ("sma_short", self.sma_short),
            ("sma_long", self.sma_long),
            ("adl_short", self.adl_short),
            ("adl_long", self.adl_long),
        ] {
            if window == 0 {
                return Err(TraderError::invalid_parameter(name, "window must be positive"));
            }
        }
        Ok(())
    }

    /// Fewest bars accepted: the largest caller window. The fixed RSI and
    /// MACD windows only extend the NaN warm-up.
    pub fn required_bars(&self) -> usize {
        self.sma_short
            .max(self.sma_long)
            .max(self.adl_short)
            .max(self.adl_long)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedBar {
    pub bar: Bar,
    pub sma_short: f64,
    pub sma_long: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub adl: f64,
    pub adl_sma_short: f64,
    pub adl_sma_long: f64,
}

impl AugmentedBar {
    /// True once every derived field has left its warm-up.
    pub fn is_warm(&self) -> bool {
        [
            self.sma_short,
            self.sma_long,
            self.rsi,
            self.macd,
            self.macd_signal,
            self.adl,
            self.adl_sma_short,
            self.adl_sma_long,
        ]
        .iter()
        .all(|v| !v.is_nan())
    }
}

pub fn augment(bars: &[Bar], windows: &IndicatorWindows) -> Result<Vec<AugmentedBar>, TraderError> {
    windows.validate()?;
    if bars.is_empty() {
        return Err(TraderError::EmptySeries);
    }
    let required = windows.required_bars();
    if bars.len() < required {
        return Err(TraderError::InsufficientData {
            bars: bars.len(),
            required,
        });
    }
    validate_bars(bars)?;

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let sma_short = rolling_mean(&closes, windows.sma_short);
    let sma_long = rolling_mean(&closes, windows.sma_long);
    let rsi = rsi_values(&closes, RSI_PERIOD);
    let (macd, macd_signal) = macd_values(&closes, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL);
    let adl = adl_values(bars);
    let adl_sma_short = rolling_mean(&adl, windows.adl_short);
    let adl_sma_long = rolling_mean(&adl, windows.adl_long);

    let augmented = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| AugmentedBar {
            bar: bar.clone(),
            sma_short: sma_short[i],
            sma_long: sma_long[i],
            rsi: rsi[i],
            macd: macd[i],
            macd_signal: macd_signal[i],
            adl: adl[i],
            adl_sma_short: adl_sma_short[i],
            adl_sma_long: adl_sma_long[i],
        })
        .collect();

    Ok(augmented)
}
