//! Parameter sweep over the price moving-average windows.
//!
//! Each combination runs an independent backtest on the rayon pool; runs
//! share only the read-only bar slice.

use std::cmp::Ordering;
use std::ops::RangeInclusive;

use log::debug;
use rayon::prelude::*;

use super::backtest::{run_backtest, BacktestParams, BacktestResult};
use super::error::TraderError;
use super::ohlcv::Bar;
use super::pipeline::IndicatorWindows;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepGrid {
    pub sma_short: RangeInclusive<usize>,
    pub sma_long: RangeInclusive<usize>,
}

impl SweepGrid {
    pub fn combinations(&self) -> Vec<(usize, usize)> {
        self.sma_short
            .clone()
            .flat_map(|short| self.sma_long.clone().map(move |long| (short, long)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepOutcome {
    pub params: BacktestParams,
    pub result: BacktestResult,
}

/// Backtest every `sma_short × sma_long` pair, other parameters from `base`.
///
/// Combinations that fail (zero window, too few bars) are skipped. Results
/// are ranked by final value, then fewer trades, then smaller windows.
pub fn sweep(
    bars: &[Bar],
    base: &BacktestParams,
    grid: &SweepGrid,
) -> Result<Vec<SweepOutcome>, TraderError> {
    if bars.is_empty() {
        return Err(TraderError::EmptySeries);
    }
    base.validate()?;

    let mut outcomes: Vec<SweepOutcome> = grid
        .combinations()
        .into_par_iter()
        .filter_map(|(sma_short, sma_long)| {
            let params = BacktestParams {
                windows: IndicatorWindows {
                    sma_short,
                    sma_long,
                    ..base.windows
                },
                ..*base
            };
            match run_backtest(bars, &params) {
                Ok(result) => Some(SweepOutcome { params, result }),
                Err(e) => {
                    debug!("skipping sma {}/{}: {}", sma_short, sma_long, e);
                    None
                }
            }
        })
        .collect();

    outcomes.sort_by(rank);
    Ok(outcomes)
}

fn rank(a: &SweepOutcome, b: &SweepOutcome) -> Ordering {
    b.result
        .final_value
        .total_cmp(&a.result.final_value)
        .then(a.result.number_of_trades.cmp(&b.result.number_of_trades))
        .then(a.params.windows.sma_short.cmp(&b.params.windows.sma_short))
        .then(a.params.windows.sma_long.cmp(&b.params.windows.sma_long))
}
