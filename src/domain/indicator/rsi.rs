//! RSI (Relative Strength Index) indicator implementation.
//!
//! Uses Wilder's smoothing for average gain/loss calculation:
//! - First average: simple mean of gains/losses over the first n deltas
//! - Subsequent: avg = (prev_avg * (n-1) + current) / n
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: RSI = 100
//!
//! Warmup: first n bars are NaN (need n price changes to compute initial average).

pub const DEFAULT_PERIOD: usize = 14;

pub fn rsi_values(closes: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; closes.len()];
    if period == 0 || closes.len() <= period {
        return out;
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = closes
        .windows(2)
        .map(|w| {
            let change = w[1] - w[0];
            (change.max(0.0), (-change).max(0.0))
        })
        .unzip();

    let n = period as f64;
    let mut avg_gain = gains[..period].iter().sum::<f64>() / n;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / n;
    out[period] = rsi_from_averages(avg_gain, avg_loss);

    for delta_idx in period..gains.len() {
        avg_gain = (avg_gain * (n - 1.0) + gains[delta_idx]) / n;
        avg_loss = (avg_loss * (n - 1.0) + losses[delta_idx]) / n;
        out[delta_idx + 1] = rsi_from_averages(avg_gain, avg_loss);
    }
    out
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}
