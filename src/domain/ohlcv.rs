//! Daily OHLCV bar representation and input validation.

use chrono::NaiveDate;

use super::error::TraderError;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// ((close - low) - (high - close)) / (high - low), 0 for a zero-range bar.
    pub fn money_flow_multiplier(&self) -> f64 {
        let range = self.high - self.low;
        if range == 0.0 {
            return 0.0;
        }
        ((self.close - self.low) - (self.high - self.close)) / range
    }

    pub fn money_flow_volume(&self) -> f64 {
        self.money_flow_multiplier() * self.volume
    }
}

/// Reject malformed bars before any indicator sees them.
///
/// Dates must be strictly increasing, prices positive and finite, volume
/// non-negative and finite, and `high >= low`.
pub fn validate_bars(bars: &[Bar]) -> Result<(), TraderError> {
    let mut prev_date: Option<NaiveDate> = None;

    for (index, bar) in bars.iter().enumerate() {
        let invalid = |reason: String| TraderError::InvalidBar {
            index,
            date: bar.date,
            reason,
        };

        if let Some(prev) = prev_date {
            if bar.date <= prev {
                return Err(invalid(format!("date not after previous bar {}", prev)));
            }
        }
        prev_date = Some(bar.date);

        for (name, price) in [
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
        ] {
            if !price.is_finite() || price <= 0.0 {
                return Err(invalid(format!("{} must be positive, got {}", name, price)));
            }
        }

        if !bar.volume.is_finite() || bar.volume < 0.0 {
            return Err(invalid(format!(
                "volume must be non-negative, got {}",
                bar.volume
            )));
        }

        if bar.high < bar.low {
            return Err(invalid(format!(
                "high {} below low {}",
                bar.high, bar.low
            )));
        }
    }

    Ok(())
}
