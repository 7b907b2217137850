//! Markdown report adapter.
//!
//! Assembles the summary, parameter table, statistics, trade log and signal
//! log into one document and writes it to disk.

pub mod tables;

use std::fs;
use std::path::Path;

use crate::domain::error::TraderError;
use crate::ports::report_port::{ReportContext, ReportPort};

pub struct TextReportAdapter;

/// Render the full markdown document for `ctx`.
pub fn render(ctx: &ReportContext) -> String {
    let mut out = format!("# Backtest report: {}\n\n", ctx.ticker);
    out.push_str(&format!("Period: {}\n\n", ctx.period.label()));

    out.push_str("## Summary\n\n```\n");
    out.push_str(&tables::render_summary(ctx.ticker, ctx.currency, ctx.result));
    out.push_str("```\n\n");

    if let Some(open) = &ctx.result.open_position {
        out.push_str(&format!(
            "_A position opened on {} at {:.2} was still open at the end of the \
             period and is not included above._\n\n",
            open.entry_date, open.entry_price
        ));
    }

    out.push_str("## Parameters\n\n");
    out.push_str(&tables::render_parameters(ctx.params));

    out.push_str("\n## Statistics\n\n");
    out.push_str(&tables::render_statistics(ctx.metrics));

    out.push_str("\n## Trades\n\n");
    out.push_str(&tables::render_trade_log(&ctx.result.trades));

    out.push_str("\n## Signals\n\n");
    out.push_str(&tables::render_signal_log(&ctx.result.signal_series));

    out
}

impl ReportPort for TextReportAdapter {
    fn write(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), TraderError> {
        fs::write(output_path, render(ctx)).map_err(|e| TraderError::Report {
            reason: format!("failed to write {}: {}", output_path.display(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::backtest::{BacktestParams, BacktestResult};
    use crate::domain::metrics::Metrics;
    use crate::domain::position::{Position, Trade};
    use crate::domain::ticker::Lookback;
    use chrono::NaiveDate;

    fn d(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn sample_result(trades: Vec<Trade>, open_position: Option<Position>) -> BacktestResult {
        let total: f64 = trades.iter().map(|t| t.profit).sum();
        BacktestResult {
            initial_investment: 100_000.0,
            final_value: 100_000.0 + total,
            total_return: total,
            percentage_return: total / 1000.0,
            number_of_trades: trades.len(),
            average_days_held: if trades.is_empty() { 0.0 } else { 21.0 },
            trades,
            signal_series: Vec::new(),
            open_position,
            equity_curve: Vec::new(),
        }
    }

    fn render_for(result: &BacktestResult) -> String {
        let params = BacktestParams::default();
        let metrics = Metrics::compute(result);
        let ctx = ReportContext {
            ticker: "1303.SR",
            currency: "SAR",
            period: Lookback::TwoYears,
            params: &params,
            result,
            metrics: &metrics,
        };
        render(&ctx)
    }

    #[test]
    fn report_contains_summary_and_trades() {
        let result = sample_result(
            vec![Trade {
                entry_date: d(2, 3),
                sell_date: d(2, 24),
                buy_price: 57.69,
                sell_price: 76.25,
                days_held: 21,
                profit: 32_166.67,
                profit_percentage: 32.17,
            }],
            None,
        );
        let out = render_for(&result);

        assert!(out.starts_with("# Backtest report: 1303.SR"));
        assert!(out.contains("Period: 2 Years"));
        assert!(out.contains("Initial Investment: 100,000.00 SAR"));
        assert!(out.contains("Final Portfolio Value: 132,166.67 SAR"));
        assert!(out.contains("Number of Trades: 1"));
        assert!(out.contains("Average Days Held per Trade: 21.00 days"));
        assert!(out.contains("| 2024-02-24 |"));
        assert!(!out.contains("still open"));
    }

    #[test]
    fn report_without_trades() {
        let out = render_for(&sample_result(Vec::new(), None));
        assert!(out.contains(tables::NO_TRADES));
        assert!(out.contains("No entry or exit signals."));
    }

    #[test]
    fn report_mentions_dropped_open_position() {
        let open = Position {
            entry_price: 57.69,
            entry_date: d(2, 3),
        };
        let out = render_for(&sample_result(Vec::new(), Some(open)));
        assert!(out.contains("opened on 2024-02-03 at 57.69 was still open"));
    }

    #[test]
    fn write_creates_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("report.md");
        let result = sample_result(Vec::new(), None);
        let params = BacktestParams::default();
        let metrics = Metrics::compute(&result);
        let ctx = ReportContext {
            ticker: "AAPL",
            currency: "USD",
            period: Lookback::OneYear,
            params: &params,
            result: &result,
            metrics: &metrics,
        };

        TextReportAdapter.write(&ctx, &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("Initial Investment: 100,000.00 USD"));
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let result = sample_result(Vec::new(), None);
        let params = BacktestParams::default();
        let metrics = Metrics::compute(&result);
        let ctx = ReportContext {
            ticker: "AAPL",
            currency: "USD",
            period: Lookback::OneYear,
            params: &params,
            result: &result,
            metrics: &metrics,
        };
        let err = TextReportAdapter
            .write(&ctx, Path::new("/nonexistent/dir/report.md"))
            .unwrap_err();
        assert!(matches!(err, TraderError::Report { .. }));
    }
}
