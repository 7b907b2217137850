//! Report generation port trait.

use std::path::Path;

use crate::domain::backtest::{BacktestParams, BacktestResult};
use crate::domain::error::TraderError;
use crate::domain::metrics::Metrics;
use crate::domain::ticker::Lookback;

/// Everything a report writer needs about one finished run.
pub struct ReportContext<'a> {
    pub ticker: &'a str,
    pub currency: &'a str,
    pub period: Lookback,
    pub params: &'a BacktestParams,
    pub result: &'a BacktestResult,
    pub metrics: &'a Metrics,
}

/// Port for writing backtest reports.
pub trait ReportPort {
    fn write(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), TraderError>;
}
