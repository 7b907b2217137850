//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use log::{error, info, warn};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_trades::CsvTradesAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report::{tables, TextReportAdapter};
use crate::domain::backtest::{run_backtest, BacktestParams, BacktestResult};
use crate::domain::config_validation::{validate_data_config, validate_strategy_config};
use crate::domain::error::TraderError;
use crate::domain::metrics::Metrics;
use crate::domain::pipeline::IndicatorWindows;
use crate::domain::sweep::{sweep, SweepGrid, SweepOutcome};
use crate::domain::ticker::{normalize_ticker, Lookback};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::{ReportContext, ReportPort};

#[derive(Parser, Debug)]
#[command(
    name = "adltrader",
    about = "SMA/RSI/MACD/ADL long-only strategy backtester"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Data-source flags; each overrides the matching `[data]` key.
#[derive(Args, Debug, Default, Clone)]
pub struct DataOverrides {
    /// Directory holding one `<TICKER>.csv` per symbol
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Ticker symbol; purely numeric symbols get the `.SR` suffix
    #[arg(long)]
    pub ticker: Option<String>,
    /// Lookback period: 1y, 2y, 5y or max
    #[arg(long)]
    pub period: Option<String>,
}

/// Strategy flags; each overrides the matching `[strategy]`/`[backtest]` key.
#[derive(Args, Debug, Default, Clone)]
pub struct StrategyOverrides {
    #[arg(long)]
    pub sma_short: Option<usize>,
    #[arg(long)]
    pub sma_long: Option<usize>,
    #[arg(long)]
    pub rsi_threshold: Option<f64>,
    #[arg(long)]
    pub adl_short: Option<usize>,
    #[arg(long)]
    pub adl_long: Option<usize>,
    #[arg(long)]
    pub initial_investment: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest and print the summary
    Backtest {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        data: DataOverrides,
        #[command(flatten)]
        strategy: StrategyOverrides,
        /// Write a markdown report
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the trade ledger as CSV
        #[arg(long)]
        trades: Option<PathBuf>,
    },
    /// Sweep the SMA windows and print the best combinations
    Optimize {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        data: DataOverrides,
        #[command(flatten)]
        strategy: StrategyOverrides,
        #[arg(long, default_value = "3..=10")]
        sma_short_range: String,
        #[arg(long, default_value = "10..=30")]
        sma_long_range: String,
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
    /// Validate a configuration file and print the resolved settings
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List tickers available in the data directory
    ListTickers {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

/// Fully resolved inputs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub data_dir: PathBuf,
    pub ticker: String,
    pub period: Lookback,
    pub currency: String,
    pub params: BacktestParams,
}

pub fn run(cli: Cli) -> ExitCode {
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

/// Dispatch a parsed command line.
pub fn execute(cli: Cli) -> Result<(), TraderError> {
    match cli.command {
        Command::Backtest {
            config,
            data,
            strategy,
            output,
            trades,
        } => run_backtest_command(
            config.as_deref(),
            &data,
            &strategy,
            output.as_deref(),
            trades.as_deref(),
        ),
        Command::Optimize {
            config,
            data,
            strategy,
            sma_short_range,
            sma_long_range,
            top,
        } => run_optimize(
            config.as_deref(),
            &data,
            &strategy,
            &sma_short_range,
            &sma_long_range,
            top,
        ),
        Command::Validate { config } => run_validate(&config),
        Command::ListTickers { config, data_dir } => {
            run_list_tickers(config.as_deref(), data_dir.as_deref())
        }
    }
}

/// Load an INI file, or an empty configuration when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, TraderError> {
    match path {
        Some(p) => {
            info!("Loading config from {}", p.display());
            FileConfigAdapter::from_file(p)
        }
        None => FileConfigAdapter::from_string(""),
    }
}

/// Merge config values with CLI overrides and validate the result.
pub fn resolve_settings(
    config: &dyn ConfigPort,
    data: &DataOverrides,
    strategy: &StrategyOverrides,
) -> Result<RunSettings, TraderError> {
    let data_settings = validate_data_config(config)?;
    let mut params = validate_strategy_config(config)?;

    let data_dir = data
        .data_dir
        .clone()
        .or_else(|| data_settings.dir.map(PathBuf::from))
        .ok_or_else(|| TraderError::ConfigMissing {
            section: "data".into(),
            key: "dir".into(),
        })?;

    let ticker = match &data.ticker {
        Some(raw) => normalize_ticker(raw)
            .map_err(|e| TraderError::invalid_parameter("ticker", e.to_string()))?,
        None => data_settings
            .ticker
            .ok_or_else(|| TraderError::ConfigMissing {
                section: "data".into(),
                key: "ticker".into(),
            })?,
    };

    let period = match &data.period {
        Some(raw) => raw
            .parse::<Lookback>()
            .map_err(|e| TraderError::invalid_parameter("period", e.to_string()))?,
        None => data_settings.period,
    };

    apply_overrides(&mut params, strategy);
    params.validate()?;

    Ok(RunSettings {
        data_dir,
        ticker,
        period,
        currency: data_settings.currency,
        params,
    })
}

fn apply_overrides(params: &mut BacktestParams, o: &StrategyOverrides) {
    let w = &mut params.windows;
    w.sma_short = o.sma_short.unwrap_or(w.sma_short);
    w.sma_long = o.sma_long.unwrap_or(w.sma_long);
    w.adl_short = o.adl_short.unwrap_or(w.adl_short);
    w.adl_long = o.adl_long.unwrap_or(w.adl_long);
    params.rsi_threshold = o.rsi_threshold.unwrap_or(params.rsi_threshold);
    params.initial_investment = o.initial_investment.unwrap_or(params.initial_investment);
}

/// Parse `a..=b`, `a..b` (end excluded, as in Rust) or a single `a` into a
/// window range.
pub fn parse_range(name: &str, raw: &str) -> Result<RangeInclusive<usize>, TraderError> {
    let bad = |reason: &str| TraderError::invalid_parameter(name, format!("{:?}: {}", raw, reason));
    let parse = |s: &str| s.trim().parse::<usize>().map_err(|_| bad("not a number"));

    let (start, end) = match raw.split_once("..") {
        Some((a, b)) => match b.strip_prefix('=') {
            Some(b) => (parse(a)?, parse(b)?),
            None => {
                let (start, end) = (parse(a)?, parse(b)?);
                if end <= start {
                    return Err(bad("range is empty"));
                }
                (start, end - 1)
            }
        },
        None => {
            let v = parse(raw)?;
            (v, v)
        }
    };
    if start == 0 {
        return Err(bad("windows must be at least 1"));
    }
    if start > end {
        return Err(bad("range start is after its end"));
    }
    Ok(start..=end)
}

/// Fetch, backtest and report for already-resolved settings.
pub fn run_backtest_pipeline(
    data_port: &dyn DataPort,
    settings: &RunSettings,
    output_path: Option<&Path>,
    trades_path: Option<&Path>,
) -> Result<BacktestResult, TraderError> {
    let bars = data_port.fetch_ohlcv(&settings.ticker, settings.period)?;
    info!(
        "Loaded {} bars for {} ({})",
        bars.len(),
        settings.ticker,
        settings.period.label()
    );

    let result = run_backtest(&bars, &settings.params)?;
    let metrics = Metrics::compute(&result);
    if let Some(open) = &result.open_position {
        warn!(
            "position opened {} at {:.2} is still open at the last bar and is not counted",
            open.entry_date, open.entry_price
        );
    }

    let ctx = ReportContext {
        ticker: &settings.ticker,
        currency: &settings.currency,
        period: settings.period,
        params: &settings.params,
        result: &result,
        metrics: &metrics,
    };
    if let Some(path) = output_path {
        TextReportAdapter.write(&ctx, path)?;
        info!("Report written to {}", path.display());
    }
    if let Some(path) = trades_path {
        CsvTradesAdapter.write(&ctx, path)?;
        info!("Trades written to {}", path.display());
    }

    Ok(result)
}

fn run_backtest_command(
    config_path: Option<&Path>,
    data: &DataOverrides,
    strategy: &StrategyOverrides,
    output_path: Option<&Path>,
    trades_path: Option<&Path>,
) -> Result<(), TraderError> {
    let config = load_config(config_path)?;
    let settings = resolve_settings(&config, data, strategy)?;
    let data_port = CsvAdapter::new(settings.data_dir.clone());

    let result = run_backtest_pipeline(&data_port, &settings, output_path, trades_path)?;

    print!(
        "{}",
        tables::render_summary(&settings.ticker, &settings.currency, &result)
    );
    println!();
    print!("{}", tables::render_trade_log(&result.trades));
    Ok(())
}

/// Run the SMA sweep for resolved settings and return the ranked outcomes.
pub fn run_optimize_pipeline(
    data_port: &dyn DataPort,
    settings: &RunSettings,
    grid: &SweepGrid,
) -> Result<Vec<SweepOutcome>, TraderError> {
    let bars = data_port.fetch_ohlcv(&settings.ticker, settings.period)?;
    let combos = grid.combinations().len();
    info!(
        "Sweeping {} SMA combinations over {} bars for {}",
        combos,
        bars.len(),
        settings.ticker
    );

    let outcomes = sweep(&bars, &settings.params, grid)?;
    if outcomes.is_empty() {
        let smallest = IndicatorWindows {
            sma_short: *grid.sma_short.start(),
            sma_long: *grid.sma_long.start(),
            ..settings.params.windows
        };
        return Err(TraderError::InsufficientData {
            bars: bars.len(),
            required: smallest.required_bars(),
        });
    }
    if outcomes.len() < combos {
        warn!(
            "{} of {} combinations skipped for lack of data",
            combos - outcomes.len(),
            combos
        );
    }
    Ok(outcomes)
}

fn run_optimize(
    config_path: Option<&Path>,
    data: &DataOverrides,
    strategy: &StrategyOverrides,
    sma_short_range: &str,
    sma_long_range: &str,
    top: usize,
) -> Result<(), TraderError> {
    let config = load_config(config_path)?;
    let settings = resolve_settings(&config, data, strategy)?;
    let grid = SweepGrid {
        sma_short: parse_range("sma_short_range", sma_short_range)?,
        sma_long: parse_range("sma_long_range", sma_long_range)?,
    };
    let data_port = CsvAdapter::new(settings.data_dir.clone());

    let outcomes = run_optimize_pipeline(&data_port, &settings, &grid)?;

    println!(
        "{:>4}  {:>9}  {:>8}  {:>18}  {:>9}  {:>6}",
        "Rank", "SMA short", "SMA long", "Final value", "Return %", "Trades"
    );
    for (rank, outcome) in outcomes.iter().take(top.max(1)).enumerate() {
        let r = &outcome.result;
        println!(
            "{:>4}  {:>9}  {:>8}  {:>18}  {:>8.2}%  {:>6}",
            rank + 1,
            outcome.params.windows.sma_short,
            outcome.params.windows.sma_long,
            tables::format_amount(r.final_value),
            r.percentage_return,
            r.number_of_trades
        );
    }

    if let Some(best) = outcomes.first() {
        println!();
        print!(
            "{}",
            tables::render_summary(&settings.ticker, &settings.currency, &best.result)
        );
        println!();
        print!("{}", tables::render_trade_log(&best.result.trades));
    }
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), TraderError> {
    info!("Validating config: {}", config_path.display());
    let config = FileConfigAdapter::from_file(config_path)?;

    let data = validate_data_config(&config)?;
    let params = validate_strategy_config(&config)?;
    let w = &params.windows;

    println!("Configuration is valid.");
    println!();
    println!(
        "  data dir:           {}",
        data.dir.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  ticker:             {}",
        data.ticker.as_deref().unwrap_or("(not set)")
    );
    println!("  period:             {}", data.period.label());
    println!("  sma windows:        {} / {}", w.sma_short, w.sma_long);
    println!("  rsi threshold:      {}", params.rsi_threshold);
    println!("  adl windows:        {} / {}", w.adl_short, w.adl_long);
    println!(
        "  initial investment: {} {}",
        tables::format_amount(params.initial_investment),
        data.currency
    );
    println!("  minimum bars:       {}", w.required_bars());
    Ok(())
}

fn run_list_tickers(config_path: Option<&Path>, data_dir: Option<&Path>) -> Result<(), TraderError> {
    let config = load_config(config_path)?;
    let dir = match data_dir {
        Some(d) => d.to_path_buf(),
        None => validate_data_config(&config)?
            .dir
            .map(PathBuf::from)
            .ok_or_else(|| TraderError::ConfigMissing {
                section: "data".into(),
                key: "dir".into(),
            })?,
    };

    let tickers = CsvAdapter::new(dir.clone()).list_tickers()?;
    if tickers.is_empty() {
        warn!("No tickers found in {}", dir.display());
    }
    for ticker in &tickers {
        println!("{}", ticker);
    }
    Ok(())
}
