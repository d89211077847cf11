//! Evenly spaced and percentile edges.

/// `intervals + 1` points evenly spaced from `start` to `stop`, endpoint exact.
pub fn linspace(start: f64, stop: f64, intervals: usize) -> Vec<f64> {
    if intervals == 0 {
        return vec![start];
    }
    let step = (stop - start) / intervals as f64;
    (0..=intervals)
        .map(|i| if i == intervals { stop } else { start + step * i as f64 })
        .collect()
}

/// Percentile `q` (0..=100) of sorted data, linearly interpolated between
/// the two nearest ranks.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = (q / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    if lo == hi || frac == 0.0 {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

/// Equal-width edges over the sample range.
pub fn equal_width_edges(values: &[f64], bins: usize) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    linspace(min, max, bins)
}

/// Equal-frequency edges at percentiles 0, 100/bins, ..., 100.
pub fn equal_freq_edges(values: &[f64], bins: usize) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    linspace(0.0, 100.0, bins)
        .into_iter()
        .map(|q| percentile(&sorted, q))
        .collect()
}
