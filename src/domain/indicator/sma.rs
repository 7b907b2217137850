//! Simple Moving Average.
//!
//! SMA[i] = mean(values[i-n+1..=i]). Warmup: first (n-1) points are NaN, as is
//! any window that still contains a NaN input.

pub fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 {
        return vec![f64::NAN; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i + 1 < period {
            out.push(f64::NAN);
            continue;
        }
        let window = &values[i + 1 - period..=i];
        if window.iter().any(|v| v.is_nan()) {
            out.push(f64::NAN);
        } else {
            out.push(window.iter().sum::<f64>() / period as f64);
        }
    }
    out
}
