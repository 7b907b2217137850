//! Backtest engine: indicators, signals, and the single-pass position walk.
//!
//! The walk has two states, flat and holding. An entry signal opens a
//! position only when flat; an exit signal closes it only when holding.
//! A position still open after the last bar is left out of the ledger.

use log::debug;

use super::error::TraderError;
use super::ohlcv::Bar;
use super::pipeline::{augment, IndicatorWindows};
use super::portfolio::{EquityPoint, Portfolio};
use super::position::{Position, Trade};
use super::signal::{generate_signals, Signal, SignalBar};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BacktestParams {
    pub windows: IndicatorWindows,
    pub rsi_threshold: f64,
    pub initial_investment: f64,
}

impl Default for BacktestParams {
    fn default() -> Self {
        BacktestParams {
            windows: IndicatorWindows::default(),
            rsi_threshold: 40.0,
            initial_investment: 100_000.0,
        }
    }
}

impl BacktestParams {
    pub fn validate(&self) -> Result<(), TraderError> {
        self.windows.validate()?;
        if !(0.0..=100.0).contains(&self.rsi_threshold) {
            return Err(TraderError::invalid_parameter(
                "rsi_threshold",
                format!("must be within [0, 100], got {}", self.rsi_threshold),
            ));
        }
        validate_investment(self.initial_investment)
    }
}

fn validate_investment(initial_investment: f64) -> Result<(), TraderError> {
    if !initial_investment.is_finite() || initial_investment <= 0.0 {
        return Err(TraderError::invalid_parameter(
            "initial_investment",
            format!("must be positive, got {}", initial_investment),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub initial_investment: f64,
    pub final_value: f64,
    pub total_return: f64,
    pub percentage_return: f64,
    pub number_of_trades: usize,
    pub average_days_held: f64,
    pub trades: Vec<Trade>,
    pub signal_series: Vec<SignalBar>,
    /// Unrealized position at the last bar; excluded from every figure above.
    pub open_position: Option<Position>,
    pub equity_curve: Vec<EquityPoint>,
}

/// Compute indicators and signals for `bars`, then simulate.
pub fn run_backtest(bars: &[Bar], params: &BacktestParams) -> Result<BacktestResult, TraderError> {
    params.validate()?;
    let augmented = augment(bars, &params.windows)?;
    let signals = generate_signals(augmented, params.rsi_threshold);
    simulate(signals, params.initial_investment)
}

/// Walk a prepared signal series once, left to right.
pub fn simulate(
    signal_series: Vec<SignalBar>,
    initial_investment: f64,
) -> Result<BacktestResult, TraderError> {
    if signal_series.is_empty() {
        return Err(TraderError::EmptySeries);
    }
    validate_investment(initial_investment)?;

    let mut portfolio = Portfolio::new(initial_investment);

    for bar in &signal_series {
        let (date, close) = (bar.date(), bar.close());
        match bar.signal {
            Signal::LongEntry if !portfolio.is_holding() => {
                portfolio.open(close, date);
                debug!("{}: enter long at {:.4}", date, close);
            }
            Signal::LongExit if portfolio.is_holding() => {
                if let Some(trade) = portfolio.close(close, date) {
                    debug!(
                        "{}: exit long at {:.4}, profit {:.2} ({:.2}%)",
                        date, close, trade.profit, trade.profit_percentage
                    );
                }
            }
            _ => {}
        }
        let equity = portfolio.equity_at(close);
        portfolio.record_equity(date, equity);
    }

    if let Some(pos) = &portfolio.position {
        debug!(
            "position opened {} at {:.4} still open at end of series; not counted",
            pos.entry_date, pos.entry_price
        );
    }

    Ok(summarize(portfolio, signal_series))
}

fn summarize(portfolio: Portfolio, signal_series: Vec<SignalBar>) -> BacktestResult {
    let initial_investment = portfolio.initial_investment;
    let final_value = portfolio.value();
    let total_return = final_value - initial_investment;
    let number_of_trades = portfolio.trades.len();
    let average_days_held = if number_of_trades > 0 {
        portfolio.trades.iter().map(|t| t.days_held).sum::<i64>() as f64 / number_of_trades as f64
    } else {
        0.0
    };

    BacktestResult {
        initial_investment,
        final_value,
        total_return,
        percentage_return: total_return / initial_investment * 100.0,
        number_of_trades,
        average_days_held,
        trades: portfolio.trades,
        signal_series,
        open_position: portfolio.position,
        equity_curve: portfolio.equity_curve,
    }
}
