//! Portfolio state for a single-instrument, fully reinvested strategy.

use chrono::NaiveDate;

use super::position::{Position, Trade};

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

/// Value changes only when a trade is realized. It is kept as
/// `initial_investment + realized_pnl`, so the final value always equals the
/// initial investment plus the ledger's profits summed in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub initial_investment: f64,
    pub realized_pnl: f64,
    pub position: Option<Position>,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
}

impl Portfolio {
    pub fn new(initial_investment: f64) -> Self {
        Portfolio {
            initial_investment,
            realized_pnl: 0.0,
            position: None,
            trades: Vec::new(),
            equity_curve: Vec::new(),
        }
    }

    pub fn value(&self) -> f64 {
        self.initial_investment + self.realized_pnl
    }

    pub fn is_holding(&self) -> bool {
        self.position.is_some()
    }

    /// Open a position with the whole portfolio. No-op while already holding.
    pub fn open(&mut self, price: f64, date: NaiveDate) -> bool {
        if self.position.is_some() {
            return false;
        }
        self.position = Some(Position {
            entry_price: price,
            entry_date: date,
        });
        true
    }

    /// Close the open position and append the realized trade to the ledger.
    pub fn close(&mut self, price: f64, date: NaiveDate) -> Option<&Trade> {
        let position = self.position.take()?;

        let profit = position.profit(self.value(), price);
        self.realized_pnl += profit;
        let value_after = self.value();

        self.trades.push(Trade {
            entry_date: position.entry_date,
            sell_date: date,
            buy_price: position.entry_price,
            sell_price: price,
            days_held: position.days_held(date),
            profit,
            profit_percentage: profit / (value_after - profit) * 100.0,
        });
        self.trades.last()
    }

    /// Mark-to-market equity at `price`: the open position is valued at the
    /// current close, otherwise the realized value.
    pub fn equity_at(&self, price: f64) -> f64 {
        match &self.position {
            Some(pos) => pos.market_value(self.value(), price),
            None => self.value(),
        }
    }

    pub fn record_equity(&mut self, date: NaiveDate, equity: f64) {
        self.equity_curve.push(EquityPoint { date, equity });
    }
}
