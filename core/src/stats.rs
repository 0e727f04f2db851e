//! Distribution summaries across trials.

use serde::{Deserialize, Serialize};

/// Aggregate of one metric across all trials of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub mean: f64,
    pub p10:  f64,
    pub p90:  f64,
}

/// Linear-interpolation percentile over an ascending slice.
///
/// `pct` is a fraction in [0, 1]. With `k = (n - 1) * pct` the result
/// interpolates between the values at `floor(k)` and `ceil(k)`.
/// An empty slice yields `0.0`. `pct` outside [0, 1] is clamped.
pub fn percentile(sorted_values: &[f64], pct: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }
    let pct = pct.clamp(0.0, 1.0);
    let k = (sorted_values.len() - 1) as f64 * pct;
    let f = k.floor();
    let c = k.ceil();
    if f == c {
        return sorted_values[k as usize];
    }
    let d0 = sorted_values[f as usize] * (c - k);
    let d1 = sorted_values[c as usize] * (k - f);
    d0 + d1
}

/// Sort `values` ascending and summarise them.
/// An empty input summarises to all zeros.
pub fn summarise(mut values: Vec<f64>) -> SummaryStats {
    values.sort_by(f64::total_cmp);
    let mean = if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    };
    SummaryStats {
        mean,
        p10: percentile(&values, 0.10),
        p90: percentile(&values, 0.90),
    }
}
