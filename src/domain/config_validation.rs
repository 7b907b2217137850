//! Configuration validation.
//!
//! Resolves `[data]`, `[strategy]` and `[backtest]` keys into typed settings
//! before anything runs. Missing keys fall back to defaults; present but
//! malformed or out-of-range keys are rejected.

use std::str::FromStr;

use crate::domain::backtest::BacktestParams;
use crate::domain::error::TraderError;
use crate::domain::pipeline::IndicatorWindows;
use crate::domain::ticker::{normalize_ticker, Lookback};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_CURRENCY: &str = "SAR";

/// Where the price data comes from and how much of it to use.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSettings {
    pub dir: Option<String>,
    pub ticker: Option<String>,
    pub period: Lookback,
    pub currency: String,
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<DataSettings, TraderError> {
    let dir = non_empty(config.get_string("data", "dir"));

    let ticker = match non_empty(config.get_string("data", "ticker")) {
        Some(raw) => Some(normalize_ticker(&raw).map_err(|e| invalid("data", "ticker", e))?),
        None => None,
    };

    let period = match non_empty(config.get_string("data", "period")) {
        Some(raw) => raw
            .parse::<Lookback>()
            .map_err(|e| invalid("data", "period", e))?,
        None => Lookback::default(),
    };

    let currency = non_empty(config.get_string("backtest", "currency"))
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    Ok(DataSettings {
        dir,
        ticker,
        period,
        currency,
    })
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<BacktestParams, TraderError> {
    let defaults = BacktestParams::default();

    let windows = IndicatorWindows {
        sma_short: window(config, "sma_short", defaults.windows.sma_short)?,
        sma_long: window(config, "sma_long", defaults.windows.sma_long)?,
        adl_short: window(config, "adl_short", defaults.windows.adl_short)?,
        adl_long: window(config, "adl_long", defaults.windows.adl_long)?,
    };

    let rsi_threshold = parse_key(config, "strategy", "rsi_threshold", defaults.rsi_threshold)?;
    if !(0.0..=100.0).contains(&rsi_threshold) {
        return Err(invalid(
            "strategy",
            "rsi_threshold",
            "rsi_threshold must be between 0 and 100",
        ));
    }

    let initial_investment = parse_key(
        config,
        "backtest",
        "initial_investment",
        defaults.initial_investment,
    )?;
    if !initial_investment.is_finite() || initial_investment <= 0.0 {
        return Err(invalid(
            "backtest",
            "initial_investment",
            "initial_investment must be positive",
        ));
    }

    Ok(BacktestParams {
        windows,
        rsi_threshold,
        initial_investment,
    })
}

fn window(config: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, TraderError> {
    let value = parse_key(config, "strategy", key, default)?;
    if value == 0 {
        return Err(invalid("strategy", key, format!("{} must be at least 1", key)));
    }
    Ok(value)
}

/// Parse `[section] key` as `T`, using `default` when the key is absent.
fn parse_key<T>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: T,
) -> Result<T, TraderError>
where
    T: FromStr,
{
    match non_empty(config.get_string(section, key)) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| invalid(section, key, format!("{:?} is not a valid number", raw))),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn invalid(section: &str, key: &str, reason: impl ToString) -> TraderError {
    TraderError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
