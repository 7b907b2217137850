#![allow(dead_code)]

use adltrader::domain::backtest::BacktestParams;
use adltrader::domain::error::TraderError;
pub use adltrader::domain::ohlcv::Bar;
use adltrader::domain::pipeline::IndicatorWindows;
use adltrader::domain::ticker::Lookback;
use adltrader::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
    pub requests: RefCell<Vec<(String, Lookback)>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_ohlcv(&self, ticker: &str, lookback: Lookback) -> Result<Vec<Bar>, TraderError> {
        self.requests
            .borrow_mut()
            .push((ticker.to_string(), lookback));
        if let Some(reason) = self.errors.get(ticker) {
            return Err(TraderError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).cloned().unwrap_or_default())
    }

    fn list_tickers(&self) -> Result<Vec<String>, TraderError> {
        let mut tickers: Vec<String> = self.data.keys().cloned().collect();
        tickers.sort();
        Ok(tickers)
    }
}

pub fn day(offset: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(offset as i64)
}

/// Close near the low on falling days and near the high on rising days, so the
/// accumulation/distribution line follows the trend.
pub fn make_bar(offset: usize, close: f64, rising: bool) -> Bar {
    let (high, low) = if rising {
        (close + 0.5, close - 1.5)
    } else {
        (close + 1.5, close - 0.5)
    };
    Bar {
        date: day(offset),
        open: close,
        high,
        low,
        close,
        volume: 1000.0,
    }
}

pub fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_bar(i, c, i > 0 && c >= closes[i - 1]))
        .collect()
}

pub fn flat_bars(count: usize, close: f64) -> Vec<Bar> {
    (0..count)
        .map(|i| Bar {
            date: day(i),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000.0,
        })
        .collect()
}

/// `down` bars falling linearly from 100 to 50, then `up` bars rising to 120.
pub fn v_shape_closes(down: usize, up: usize) -> Vec<f64> {
    let mut closes: Vec<f64> = (0..down)
        .map(|i| 100.0 - 50.0 * i as f64 / (down - 1) as f64)
        .collect();
    closes.extend((1..=up).map(|j| 50.0 + 70.0 * j as f64 / up as f64));
    closes
}

pub fn v_shape_bars(down: usize, up: usize) -> Vec<Bar> {
    bars_from_closes(&v_shape_closes(down, up))
}

/// 100 -> 50 -> 120 -> 60 -> 140 in four legs of 40 bars.
pub fn w_shape_bars() -> Vec<Bar> {
    let mut closes = v_shape_closes(40, 40);
    closes.extend((1..=40).map(|k| 120.0 - 60.0 * k as f64 / 40.0));
    closes.extend((1..=40).map(|k| 60.0 + 80.0 * k as f64 / 40.0));
    bars_from_closes(&closes)
}

pub fn small_window_params() -> BacktestParams {
    BacktestParams {
        windows: IndicatorWindows {
            sma_short: 5,
            sma_long: 10,
            adl_short: 5,
            adl_long: 10,
        },
        ..BacktestParams::default()
    }
}

pub fn write_csv(dir: &std::path::Path, ticker: &str, bars: &[Bar]) {
    let mut content = String::from("Date,Open,High,Low,Close,Adj Close,Volume\n");
    for b in bars {
        content.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            b.date, b.open, b.high, b.low, b.close, b.close, b.volume
        ));
    }
    std::fs::write(dir.join(format!("{}.csv", ticker)), content).unwrap();
}
