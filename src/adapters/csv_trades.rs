//! Trade ledger export as CSV.

use std::path::Path;

use crate::domain::error::TraderError;
use crate::ports::report_port::{ReportContext, ReportPort};

/// Writes one row per closed trade, in ledger order.
pub struct CsvTradesAdapter;

impl ReportPort for CsvTradesAdapter {
    fn write(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), TraderError> {
        let report_err = |e: csv::Error| TraderError::Report {
            reason: format!("failed to write {}: {}", output_path.display(), e),
        };

        let mut wtr = csv::Writer::from_path(output_path).map_err(report_err)?;
        if ctx.result.trades.is_empty() {
            wtr.write_record([
                "entry_date",
                "sell_date",
                "buy_price",
                "sell_price",
                "days_held",
                "profit",
                "profit_percentage",
            ])
            .map_err(report_err)?;
        }
        for trade in &ctx.result.trades {
            wtr.serialize(trade).map_err(report_err)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::backtest::{BacktestParams, BacktestResult};
    use crate::domain::metrics::Metrics;
    use crate::domain::position::Trade;
    use crate::domain::ticker::Lookback;
    use chrono::NaiveDate;
    use std::fs;

    fn result_with(trades: Vec<Trade>) -> BacktestResult {
        BacktestResult {
            initial_investment: 100_000.0,
            final_value: 100_000.0,
            total_return: 0.0,
            percentage_return: 0.0,
            number_of_trades: trades.len(),
            average_days_held: 0.0,
            trades,
            signal_series: Vec::new(),
            open_position: None,
            equity_curve: Vec::new(),
        }
    }

    fn write(result: &BacktestResult, path: &Path) {
        let params = BacktestParams::default();
        let metrics = Metrics::compute(result);
        let ctx = ReportContext {
            ticker: "AAPL",
            currency: "USD",
            period: Lookback::Max,
            params: &params,
            result,
            metrics: &metrics,
        };
        CsvTradesAdapter.write(&ctx, path).unwrap();
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trades.csv");
        let trade = Trade {
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            sell_date: NaiveDate::from_ymd_opt(2024, 1, 11).unwrap(),
            buy_price: 50.0,
            sell_price: 60.0,
            days_held: 10,
            profit: 20_000.0,
            profit_percentage: 20.0,
        };
        write(&result_with(vec![trade]), &path);

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("entry_date,sell_date,buy_price,sell_price,days_held,profit,profit_percentage")
        );
        assert_eq!(
            lines.next(),
            Some("2024-01-01,2024-01-11,50.0,60.0,10,20000.0,20.0")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_ledger_writes_header_only() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trades.csv");
        write(&result_with(Vec::new()), &path);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.starts_with("entry_date,"));
    }
}
