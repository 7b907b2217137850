//! Open position and realized trade records.

use chrono::NaiveDate;
use serde::Serialize;

/// A single long position holding the entire portfolio value.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub entry_price: f64,
    pub entry_date: NaiveDate,
}

impl Position {
    /// Mark-to-market value of `invested` capital at `price`.
    pub fn market_value(&self, invested: f64, price: f64) -> f64 {
        invested * (price / self.entry_price)
    }

    /// Realized profit when the whole of `invested` is closed at `price`.
    pub fn profit(&self, invested: f64, price: f64) -> f64 {
        (price - self.entry_price) * (invested / self.entry_price)
    }

    pub fn days_held(&self, exit_date: NaiveDate) -> i64 {
        (exit_date - self.entry_date).num_days()
    }
}

/// One completed round trip in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trade {
    pub entry_date: NaiveDate,
    pub sell_date: NaiveDate,
    pub buy_price: f64,
    pub sell_price: f64,
    pub days_held: i64,
    pub profit: f64,
    pub profit_percentage: f64,
}
