//! CSV file data adapter.
//!
//! One file per ticker, `<dir>/<TICKER>.csv`, in the layout produced by the
//! common market-data downloaders: `Date,Open,High,Low,Close[,Adj Close],Volume`.
//! Header names are matched case-insensitively and extra columns are ignored.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use log::{debug, warn};
use serde::Deserialize;

use crate::domain::error::TraderError;
use crate::domain::ohlcv::Bar;
use crate::domain::ticker::Lookback;
use crate::ports::data_port::DataPort;

pub struct CsvAdapter {
    base_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    volume: Option<f64>,
}

impl CsvRow {
    /// None when any price or volume cell is blank (non-trading placeholder rows).
    fn into_bar(self) -> Result<Option<Bar>, TraderError> {
        let date = parse_date(&self.date)?;
        let (Some(open), Some(high), Some(low), Some(close), Some(volume)) =
            (self.open, self.high, self.low, self.close, self.volume)
        else {
            return Ok(None);
        };
        Ok(Some(Bar {
            date,
            open,
            high,
            low,
            close,
            volume,
        }))
    }
}

/// Accepts `YYYY-MM-DD` optionally followed by a time component.
fn parse_date(raw: &str) -> Result<NaiveDate, TraderError> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| TraderError::Data {
        reason: format!("invalid date {:?}: {}", raw, e),
    })
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }

    fn read_bars(&self, ticker: &str) -> Result<Vec<Bar>, TraderError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| TraderError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = rdr.headers().map_err(|e| TraderError::Data {
            reason: format!("CSV header error in {}: {}", path.display(), e),
        })?;
        let lowered: csv::StringRecord = headers.iter().map(|h| h.to_lowercase()).collect();
        rdr.set_headers(lowered);

        let mut bars = Vec::new();
        let mut skipped = 0usize;
        for row in rdr.deserialize::<CsvRow>() {
            let row = row.map_err(|e| TraderError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;
            match row.into_bar()? {
                Some(bar) => bars.push(bar),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!("{}: skipped {} rows with blank values", ticker, skipped);
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(&self, ticker: &str, lookback: Lookback) -> Result<Vec<Bar>, TraderError> {
        let mut bars = self.read_bars(ticker)?;

        if let Some(cutoff) = bars.last().and_then(|last| lookback.cutoff(last.date)) {
            bars.retain(|b| b.date > cutoff);
        }
        debug!("{}: loaded {} bars for period {}", ticker, bars.len(), lookback);
        Ok(bars)
    }

    fn list_tickers(&self) -> Result<Vec<String>, TraderError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| TraderError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut tickers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| TraderError::Data {
                reason: format!("directory entry error: {}", e),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                if let Some(stem) = path.file_stem() {
                    tickers.push(stem.to_string_lossy().into_owned());
                }
            }
        }

        tickers.sort();
        Ok(tickers)
    }
}
