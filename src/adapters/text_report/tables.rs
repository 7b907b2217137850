//! Markdown blocks for the text report.
//!
//! - Summary block (the figures printed after every run)
//! - Parameter and statistics tables
//! - Trade log and signal log

use crate::domain::backtest::{BacktestParams, BacktestResult};
use crate::domain::metrics::Metrics;
use crate::domain::position::Trade;
use crate::domain::signal::{Signal, SignalBar};

pub const NO_TRADES: &str = "No trades were made during this period.";

/// `1234567.891` -> `1,234,567.89`
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Plain-text summary, one figure per line.
pub fn render_summary(ticker: &str, currency: &str, result: &BacktestResult) -> String {
    format!(
        "Ticker: {}\n\
         Initial Investment: {} {}\n\
         Final Portfolio Value: {} {}\n\
         Total Return: {} {}\n\
         Percentage Return: {:.2}%\n\
         Number of Trades: {}\n\
         Average Days Held per Trade: {:.2} days\n",
        ticker,
        format_amount(result.initial_investment),
        currency,
        format_amount(result.final_value),
        currency,
        format_amount(result.total_return),
        currency,
        result.percentage_return,
        result.number_of_trades,
        result.average_days_held,
    )
}

pub fn render_parameters(params: &BacktestParams) -> String {
    let w = &params.windows;
    let mut out = String::from("| Parameter | Value |\n|---|---|\n");
    out.push_str(&format!("| SMA short window | {} |\n", w.sma_short));
    out.push_str(&format!("| SMA long window | {} |\n", w.sma_long));
    out.push_str(&format!("| RSI threshold | {} |\n", params.rsi_threshold));
    out.push_str(&format!("| ADL short window | {} |\n", w.adl_short));
    out.push_str(&format!("| ADL long window | {} |\n", w.adl_long));
    out
}

pub fn render_statistics(metrics: &Metrics) -> String {
    let profit_factor = if metrics.profit_factor.is_infinite() {
        "∞".to_string()
    } else {
        format!("{:.2}", metrics.profit_factor)
    };

    let mut out = String::from("| Statistic | Value |\n|---|---|\n");
    out.push_str(&format!("| Trades won | {} |\n", metrics.trades_won));
    out.push_str(&format!("| Trades lost | {} |\n", metrics.trades_lost));
    out.push_str(&format!("| Win rate | {:.2}% |\n", metrics.win_rate * 100.0));
    out.push_str(&format!("| Profit factor | {} |\n", profit_factor));
    out.push_str(&format!("| Largest win | {} |\n", format_amount(metrics.largest_win)));
    out.push_str(&format!("| Largest loss | {} |\n", format_amount(metrics.largest_loss)));
    out.push_str(&format!(
        "| Max drawdown | {:.2}% |\n",
        metrics.max_drawdown * 100.0
    ));
    out.push_str(&format!(
        "| Max drawdown duration | {} bars |\n",
        metrics.max_drawdown_duration
    ));
    out
}

pub fn render_trade_log(trades: &[Trade]) -> String {
    if trades.is_empty() {
        return format!("{}\n", NO_TRADES);
    }

    let mut out = String::from(
        "| Sell Date | Buy Price | Sell Price | Days Held | Profit | Profit % |\n\
         |---|---:|---:|---:|---:|---:|\n",
    );
    for t in trades {
        out.push_str(&format!(
            "| {} | {:.2} | {:.2} | {} | {} | {:.2}% |\n",
            t.sell_date,
            t.buy_price,
            t.sell_price,
            t.days_held,
            format_amount(t.profit),
            t.profit_percentage,
        ));
    }
    out
}

/// Entry and exit signals only; neutral bars are omitted.
pub fn render_signal_log(series: &[SignalBar]) -> String {
    let active: Vec<&SignalBar> = series
        .iter()
        .filter(|b| b.signal != Signal::Neutral)
        .collect();
    if active.is_empty() {
        return "No entry or exit signals.\n".to_string();
    }

    let mut out = String::from("| Date | Signal | Close |\n|---|---|---:|\n");
    for bar in active {
        out.push_str(&format!(
            "| {} | {} | {:.2} |\n",
            bar.date(),
            bar.signal,
            bar.close()
        ));
    }
    out
}
