//! Per-bar categorical trading signal.
//!
//! Exit (take profit on strength) when every one of these holds:
//!   close >= sma_short, sma_short > sma_long, adl_sma_short > adl_sma_long,
//!   rsi >= threshold, macd > macd_signal
//! Entry (buy weakness) when close < sma_short and sma_short < sma_long.
//! Exit wins if both hold. Bars with any NaN input are never actionable.

use std::fmt;

use super::pipeline::AugmentedBar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    LongEntry,
    LongExit,
    Neutral,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::LongEntry => write!(f, "LONG_ENTRY"),
            Signal::LongExit => write!(f, "LONG_EXIT"),
            Signal::Neutral => write!(f, "NONE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalBar {
    pub augmented: AugmentedBar,
    pub signal: Signal,
}

impl SignalBar {
    pub fn close(&self) -> f64 {
        self.augmented.bar.close
    }

    pub fn date(&self) -> chrono::NaiveDate {
        self.augmented.bar.date
    }
}

pub fn is_exit(bar: &AugmentedBar, rsi_threshold: f64) -> bool {
    bar.bar.close >= bar.sma_short
        && bar.sma_short > bar.sma_long
        && bar.adl_sma_short > bar.adl_sma_long
        && bar.rsi >= rsi_threshold
        && bar.macd > bar.macd_signal
}

pub fn is_entry(bar: &AugmentedBar) -> bool {
    bar.bar.close < bar.sma_short && bar.sma_short < bar.sma_long
}

pub fn evaluate(bar: &AugmentedBar, rsi_threshold: f64) -> Signal {
    if !bar.is_warm() {
        Signal::Neutral
    } else if is_exit(bar, rsi_threshold) {
        Signal::LongExit
    } else if is_entry(bar) {
        Signal::LongEntry
    } else {
        Signal::Neutral
    }
}

pub fn generate_signals(augmented: Vec<AugmentedBar>, rsi_threshold: f64) -> Vec<SignalBar> {
    augmented
        .into_iter()
        .map(|bar| {
            let signal = evaluate(&bar, rsi_threshold);
            SignalBar {
                augmented: bar,
                signal,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::Bar;
    use chrono::NaiveDate;

    fn exit_bar() -> AugmentedBar {
        AugmentedBar {
            bar: Bar {
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                open: 110.0,
                high: 112.0,
                low: 108.0,
                close: 111.0,
                volume: 1000.0,
            },
            sma_short: 110.0,
            sma_long: 105.0,
            rsi: 60.0,
            macd: 1.5,
            macd_signal: 1.0,
            adl: 5000.0,
            adl_sma_short: 4000.0,
            adl_sma_long: 3000.0,
        }
    }

    fn entry_bar() -> AugmentedBar {
        AugmentedBar {
            sma_short: 95.0,
            sma_long: 100.0,
            bar: Bar {
                close: 90.0,
                ..exit_bar().bar
            },
            ..exit_bar()
        }
    }

    #[test]
    fn exit_when_all_conditions_hold() {
        assert_eq!(evaluate(&exit_bar(), 40.0), Signal::LongExit);
    }

    #[test]
    fn exit_close_equal_to_sma_short_counts() {
        let mut bar = exit_bar();
        bar.bar.close = bar.sma_short;
        assert_eq!(evaluate(&bar, 40.0), Signal::LongExit);
    }

    #[test]
    fn exit_rsi_at_threshold_counts() {
        let bar = AugmentedBar {
            rsi: 40.0,
            ..exit_bar()
        };
        assert_eq!(evaluate(&bar, 40.0), Signal::LongExit);
        assert_eq!(evaluate(&bar, 40.5), Signal::Neutral);
    }

    #[test]
    fn exit_requires_each_condition() {
        let cases = [
            AugmentedBar {
                sma_long: 110.0,
                ..exit_bar()
            },
            AugmentedBar {
                adl_sma_long: 4000.0,
                ..exit_bar()
            },
            AugmentedBar {
                macd_signal: 1.5,
                ..exit_bar()
            },
            AugmentedBar {
                sma_short: 111.5,
                ..exit_bar()
            },
        ];
        for bar in cases {
            assert_eq!(evaluate(&bar, 40.0), Signal::Neutral, "{:?}", bar);
        }
    }

    #[test]
    fn entry_on_weakness_in_downtrend() {
        assert_eq!(evaluate(&entry_bar(), 40.0), Signal::LongEntry);
    }

    #[test]
    fn entry_ignores_rsi_macd_and_adl_values() {
        let bar = AugmentedBar {
            rsi: 5.0,
            macd: -3.0,
            adl_sma_short: -1.0,
            ..entry_bar()
        };
        assert_eq!(evaluate(&bar, 40.0), Signal::LongEntry);
    }

    #[test]
    fn equal_smas_never_fire() {
        let bar = AugmentedBar {
            sma_short: 100.0,
            sma_long: 100.0,
            bar: Bar {
                close: 100.0,
                ..exit_bar().bar
            },
            ..exit_bar()
        };
        assert_eq!(evaluate(&bar, 0.0), Signal::Neutral);

        let below = AugmentedBar {
            bar: Bar {
                close: 90.0,
                ..bar.bar.clone()
            },
            ..bar
        };
        assert_eq!(evaluate(&below, 0.0), Signal::Neutral);
    }

    #[test]
    fn nan_field_is_not_actionable() {
        let bar = AugmentedBar {
            macd_signal: f64::NAN,
            ..entry_bar()
        };
        assert_eq!(evaluate(&bar, 40.0), Signal::Neutral);

        let bar = AugmentedBar {
            adl_sma_long: f64::NAN,
            ..exit_bar()
        };
        assert_eq!(evaluate(&bar, 40.0), Signal::Neutral);
    }

    #[test]
    fn generate_preserves_length() {
        let bars = vec![exit_bar(), entry_bar(), exit_bar()];
        let signals = generate_signals(bars, 40.0);
        let kinds: Vec<Signal> = signals.iter().map(|s| s.signal).collect();
        assert_eq!(
            kinds,
            vec![Signal::LongExit, Signal::LongEntry, Signal::LongExit]
        );
        assert!((signals[1].close() - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn display_names() {
        assert_eq!(Signal::LongEntry.to_string(), "LONG_ENTRY");
        assert_eq!(Signal::LongExit.to_string(), "LONG_EXIT");
        assert_eq!(Signal::Neutral.to_string(), "NONE");
    }
}
