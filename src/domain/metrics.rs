//! Trade statistics and drawdown derived from a finished backtest.

use super::backtest::BacktestResult;
use super::portfolio::EquityPoint;
use super::position::Trade;

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub trades_won: usize,
    pub trades_lost: usize,
    pub trades_breakeven: usize,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
    pub max_drawdown: f64,
    pub max_drawdown_duration: i64,
}

impl Metrics {
    pub fn compute(result: &BacktestResult) -> Self {
        let mut m = Self::from_trades(&result.trades);
        let (max_drawdown, max_drawdown_duration) = compute_drawdown(&result.equity_curve);
        m.max_drawdown = max_drawdown;
        m.max_drawdown_duration = max_drawdown_duration;
        m
    }

    pub fn from_trades(trades: &[Trade]) -> Self {
        let mut trades_won = 0usize;
        let mut trades_lost = 0usize;
        let mut trades_breakeven = 0usize;
        let mut total_wins = 0.0_f64;
        let mut total_losses = 0.0_f64;
        let mut largest_win = 0.0_f64;
        let mut largest_loss = 0.0_f64;

        for trade in trades {
            let pnl = trade.profit;
            if pnl > 0.0 {
                trades_won += 1;
                total_wins += pnl;
                largest_win = largest_win.max(pnl);
            } else if pnl < 0.0 {
                trades_lost += 1;
                total_losses += pnl.abs();
                largest_loss = largest_loss.max(pnl.abs());
            } else {
                trades_breakeven += 1;
            }
        }

        let win_rate = if trades.is_empty() {
            0.0
        } else {
            trades_won as f64 / trades.len() as f64
        };

        let profit_factor = if total_losses > 0.0 {
            total_wins / total_losses
        } else if total_wins > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        Metrics {
            trades_won,
            trades_lost,
            trades_breakeven,
            win_rate,
            profit_factor,
            largest_win,
            largest_loss,
            max_drawdown: 0.0,
            max_drawdown_duration: 0,
        }
    }
}

/// Largest peak-to-trough fall as a fraction of the peak, and the longest
/// run of bars spent below a prior peak.
fn compute_drawdown(equity_curve: &[EquityPoint]) -> (f64, i64) {
    let Some(first) = equity_curve.first() else {
        return (0.0, 0);
    };

    let mut peak = first.equity;
    let mut max_dd = 0.0_f64;
    let mut max_duration = 0i64;
    let mut current_duration = 0i64;

    for point in equity_curve {
        if point.equity >= peak {
            peak = point.equity;
            current_duration = 0;
        } else if peak > 0.0 {
            max_dd = max_dd.max((peak - point.equity) / peak);
            current_duration += 1;
            max_duration = max_duration.max(current_duration);
        }
    }

    (max_dd, max_duration)
}
