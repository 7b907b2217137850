//! Accumulation/Distribution Line.

use crate::domain::ohlcv::Bar;

/// ADL[0] = MFV[0]
/// ADL[i] = ADL[i-1] + MFV[i], where MFV = money flow multiplier * volume
///
/// No warmup period; all bars are valid.
pub fn adl_values(bars: &[Bar]) -> Vec<f64> {
    bars.iter()
        .scan(0.0, |adl, bar| {
            *adl += bar.money_flow_volume();
            Some(*adl)
        })
        .collect()
}
